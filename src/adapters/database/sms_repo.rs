use crate::adapters::database::records::SmsRow;
use crate::domain::sms::{ListLimit, NewSms, SmsRecord};
use crate::error::{AppError, Result};
use sqlx::PgConnection;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct SmsRepository {}

impl SmsRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a received message under a freshly generated time-ordered id.
    ///
    /// # Errors
    /// Returns `AppError::StorageUnavailable` if the connection drops mid-query.
    /// Returns `AppError::Database` if the insert is rejected.
    #[tracing::instrument(level = "debug", skip(self, conn, sms), fields(parsed = sms.parsed.is_some()))]
    pub(crate) async fn create(&self, conn: &mut PgConnection, sms: &NewSms) -> Result<Uuid> {
        let id = Uuid::now_v7();

        sqlx::query(
            r#"
            INSERT INTO sms (id, sender, recipient, text, parsed, raw, received_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(sms.from.as_deref())
        .bind(sms.to.as_deref())
        .bind(sms.text.as_deref())
        .bind(sms.parsed.as_ref().map(Json))
        .bind(sms.raw.as_ref().map(Json))
        .bind(sms.received_at)
        .execute(conn)
        .await
        .map_err(AppError::from_storage)?;

        Ok(id)
    }

    /// Fetches the most recently received messages.
    ///
    /// # Errors
    /// Returns `AppError::Database` if a stored row cannot be decoded.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn fetch_newest(&self, conn: &mut PgConnection, limit: ListLimit) -> Result<Vec<SmsRecord>> {
        let rows = sqlx::query_as::<_, SmsRow>(
            r#"
            SELECT id, sender, recipient, text, parsed, raw, received_at
            FROM sms
            ORDER BY received_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit.get()))
        .fetch_all(conn)
        .await
        .map_err(AppError::from_storage)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
