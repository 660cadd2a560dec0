use crate::adapters::store::SmsStore;
use crate::domain::sms::NewSms;
use crate::error::Result;
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) received_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("sms-tracker");
        Self {
            received_total: meter
                .u64_counter("sms_received_total")
                .with_description("Messages accepted by the ingest webhook")
                .build(),
        }
    }
}

/// Result of accepting a message.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Written to the store under `id`.
    Stored { id: Uuid, sms: NewSms },
    /// Acknowledged but not written because the store was unavailable.
    Unpersisted(NewSms),
}

#[derive(Clone, Debug)]
pub struct IngestService {
    store: Arc<dyn SmsStore>,
    metrics: Metrics,
}

impl IngestService {
    #[must_use]
    pub fn new(store: Arc<dyn SmsStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Stamps, parses and stores one received message.
    ///
    /// A store outage is not an error here: the message is returned unpersisted instead.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store rejects the write for any other reason.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, from, to, text, raw),
        fields(parsed = tracing::field::Empty, persisted = tracing::field::Empty)
    )]
    pub async fn receive(
        &self,
        from: Option<String>,
        to: Option<String>,
        text: String,
        raw: Option<Value>,
    ) -> Result<IngestOutcome> {
        let sms = NewSms::receive(from, to, text, raw);
        let parsed = sms.parsed.is_some();
        tracing::Span::current().record("parsed", parsed);

        let outcome = match self.store.append(&sms).await {
            Ok(id) => {
                tracing::debug!(%id, "SMS stored");
                IngestOutcome::Stored { id, sms }
            }
            Err(e) if e.is_unavailable() => {
                tracing::warn!(error = %e, "Storage unavailable, acknowledging without persisting");
                IngestOutcome::Unpersisted(sms)
            }
            Err(e) => return Err(e),
        };

        let persisted = matches!(outcome, IngestOutcome::Stored { .. });
        tracing::Span::current().record("persisted", persisted);
        self.metrics.received_total.add(
            1,
            &[KeyValue::new("parsed", parsed), KeyValue::new("persisted", persisted)],
        );

        Ok(outcome)
    }
}
