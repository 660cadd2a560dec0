use crate::adapters::store::SmsStore;
use crate::domain::sms::{ListLimit, SmsRecord};
use crate::error::Result;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) list_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("sms-tracker");
        Self {
            list_total: meter
                .u64_counter("sms_list_total")
                .with_description("Listing requests served, by whether placeholder data was returned")
                .build(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Records(Vec<SmsRecord>),
    /// Nothing real to show: the store is empty or unreachable.
    Placeholder,
}

#[derive(Clone, Debug)]
pub struct ListingService {
    store: Arc<dyn SmsStore>,
    metrics: Metrics,
}

impl ListingService {
    #[must_use]
    pub fn new(store: Arc<dyn SmsStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Returns the newest records, or `Listing::Placeholder` when there are none to show.
    ///
    /// # Errors
    /// Returns `AppError::Database` if stored data cannot be read back.
    #[tracing::instrument(err(level = "warn"), skip(self, limit), fields(limit = limit.get()))]
    pub async fn newest(&self, limit: ListLimit) -> Result<Listing> {
        let listing = match self.store.newest(limit).await {
            Ok(records) if records.is_empty() => Listing::Placeholder,
            Ok(records) => Listing::Records(records),
            Err(e) if e.is_unavailable() => {
                tracing::warn!(error = %e, "Storage unavailable, returning placeholder");
                Listing::Placeholder
            }
            Err(e) => return Err(e),
        };

        let placeholder = matches!(listing, Listing::Placeholder);
        self.metrics.list_total.add(1, &[KeyValue::new("placeholder", placeholder)]);

        Ok(listing)
    }
}
