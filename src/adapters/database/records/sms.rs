use crate::domain::sms::{ParsedFields, SmsRecord};
use serde_json::Value;
use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct SmsRow {
    pub(crate) id: Uuid,
    pub(crate) sender: Option<String>,
    pub(crate) recipient: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) parsed: Option<Json<ParsedFields>>,
    pub(crate) raw: Option<Json<Value>>,
    pub(crate) received_at: OffsetDateTime,
}

impl From<SmsRow> for SmsRecord {
    fn from(row: SmsRow) -> Self {
        Self {
            id: row.id,
            from: row.sender,
            to: row.recipient,
            text: row.text,
            parsed: row.parsed.map(|Json(p)| p),
            received_at: Some(row.received_at),
            raw: row.raw.map(|Json(v)| v),
        }
    }
}
