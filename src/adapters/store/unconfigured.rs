use super::{SmsStore, unavailable};
use crate::domain::sms::{ListLimit, NewSms, SmsRecord};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Stand-in used when no database URL is configured. Every operation reports the store as unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl SmsStore for UnconfiguredStore {
    async fn append(&self, _sms: &NewSms) -> Result<Uuid> {
        Err(unavailable("no database configured"))
    }

    async fn newest(&self, _limit: ListLimit) -> Result<Vec<SmsRecord>> {
        Err(unavailable("no database configured"))
    }

    async fn ping(&self) -> Result<()> {
        Err(unavailable("no database configured"))
    }

    fn is_configured(&self) -> bool {
        false
    }
}
