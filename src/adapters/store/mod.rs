use crate::domain::sms::{ListLimit, NewSms, SmsRecord};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use uuid::Uuid;

pub mod unconfigured;

pub use unconfigured::UnconfiguredStore;

/// Append-only collection of received messages.
///
/// Implementations report connectivity problems as `AppError::StorageUnavailable`
/// so the handlers can degrade rather than fail.
#[async_trait]
pub trait SmsStore: Send + Sync + std::fmt::Debug + 'static {
    /// Writes one record and returns the identifier the store assigned to it.
    async fn append(&self, sms: &NewSms) -> Result<Uuid>;

    /// Returns up to `limit` records, newest receipt time first.
    async fn newest(&self, limit: ListLimit) -> Result<Vec<SmsRecord>>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<()>;

    /// Whether a backing store was configured at all.
    fn is_configured(&self) -> bool {
        true
    }
}

pub(crate) fn unavailable(reason: impl Into<String>) -> AppError {
    AppError::StorageUnavailable(reason.into())
}
