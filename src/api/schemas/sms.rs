use crate::domain::sms::{NewSms, ParsedFields, SmsRecord, strip_nul};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

/// Webhook body as sent by the forwarding device.
///
/// The message text may arrive as `body`, `text` or `message` depending on the integration.
#[derive(Debug, Default, Deserialize)]
pub struct ReceiveSmsRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
    pub text: Option<String>,
    pub message: Option<String>,
    pub sender: Option<String>,
}

/// Validated webhook fields.
#[derive(Debug, PartialEq, Eq)]
pub struct Submission {
    pub from: Option<String>,
    pub to: Option<String>,
    pub text: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| strip_nul(&v).trim().to_string()).filter(|v| !v.is_empty())
}

impl ReceiveSmsRequest {
    /// Picks the message text and normalizes the optional addresses.
    ///
    /// # Errors
    /// Returns `"missing_text"` if none of the text fields carries non-whitespace content.
    pub fn validate(self) -> Result<Submission, &'static str> {
        let text = non_blank(self.body)
            .or_else(|| non_blank(self.text))
            .or_else(|| non_blank(self.message))
            .ok_or("missing_text")?;

        Ok(Submission { from: non_blank(self.from).or_else(|| non_blank(self.sender)), to: non_blank(self.to), text })
    }
}

/// Public shape of a message. Every field is always present, `null` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsItem {
    pub id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub text: Option<String>,
    pub parsed: Option<ParsedFields>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub received_at: Option<OffsetDateTime>,
    pub raw: Option<Value>,
}

impl SmsItem {
    /// Sample row shown by the dashboard while there is no real data.
    #[must_use]
    pub fn placeholder(now: OffsetDateTime) -> Self {
        Self {
            id: Some("sample-1".to_string()),
            from: Some("+1000000000".to_string()),
            to: Some("+1999999999".to_string()),
            text: Some("Sample SMS text for testing".to_string()),
            parsed: Some(ParsedFields {
                amount: 15.00,
                payee: "Sample Payee".to_string(),
                date_extracted: "01/01/25".to_string(),
            }),
            received_at: Some(now),
            raw: Some(json!({})),
        }
    }
}

impl From<SmsRecord> for SmsItem {
    fn from(record: SmsRecord) -> Self {
        Self {
            id: Some(record.id.to_string()),
            from: record.from,
            to: record.to,
            text: record.text,
            parsed: record.parsed,
            received_at: record.received_at,
            raw: record.raw,
        }
    }
}

impl From<NewSms> for SmsItem {
    fn from(sms: NewSms) -> Self {
        Self {
            id: None,
            from: sms.from,
            to: sms.to,
            text: sms.text,
            parsed: sms.parsed,
            received_at: Some(sms.received_at),
            raw: sms.raw,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiveSmsResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<SmsItem>,
}

impl ReceiveSmsResponse {
    #[must_use]
    pub const fn stored(id: Uuid) -> Self {
        Self { ok: true, id: Some(id), payload: None }
    }

    #[must_use]
    pub fn unpersisted(sms: NewSms) -> Self {
        Self { ok: true, id: None, payload: Some(sms.into()) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListSmsQuery {
    pub limit: Option<String>,
}

/// Marker attached to listings that contain only the sample row.
pub const PLACEHOLDER_NOTE: &str = "dummy_returned";

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSmsResponse {
    pub ok: bool,
    pub items: Vec<SmsItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ListSmsResponse {
    #[must_use]
    pub fn records(records: Vec<SmsRecord>) -> Self {
        Self { ok: true, items: records.into_iter().map(Into::into).collect(), note: None }
    }

    #[must_use]
    pub fn placeholder(now: OffsetDateTime) -> Self {
        Self { ok: true, items: vec![SmsItem::placeholder(now)], note: Some(PLACEHOLDER_NOTE.to_string()) }
    }
}
