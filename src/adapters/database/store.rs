use crate::adapters::database::DbPool;
use crate::adapters::database::sms_repo::SmsRepository;
use crate::adapters::store::SmsStore;
use crate::domain::sms::{ListLimit, NewSms, SmsRecord};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct PgSmsStore {
    pool: DbPool,
    repo: SmsRepository,
}

impl PgSmsStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool, repo: SmsRepository::new() }
    }
}

#[async_trait]
impl SmsStore for PgSmsStore {
    async fn append(&self, sms: &NewSms) -> Result<Uuid> {
        let mut conn = self.pool.acquire().await.map_err(AppError::from_storage)?;
        self.repo.create(&mut conn, sms).await
    }

    async fn newest(&self, limit: ListLimit) -> Result<Vec<SmsRecord>> {
        let mut conn = self.pool.acquire().await.map_err(AppError::from_storage)?;
        self.repo.fetch_newest(&mut conn, limit).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(AppError::from_storage)?;
        Ok(())
    }
}
