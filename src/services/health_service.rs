use crate::adapters::store::SmsStore;
use crate::config::HealthConfig;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("sms-tracker");
        Self {
            status: meter
                .i64_gauge("sms_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageHealth {
    Ok,
    Disabled,
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn SmsStore>,
    config: HealthConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn SmsStore>, config: HealthConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Checks storage connectivity.
    ///
    /// # Errors
    /// Returns a string describing the failure if storage is unreachable.
    pub async fn check_storage(&self) -> Result<StorageHealth, String> {
        if !self.store.is_configured() {
            return Ok(StorageHealth::Disabled);
        }

        let storage_timeout = Duration::from_millis(self.config.timeout_ms);

        match timeout(storage_timeout, self.store.ping()).await {
            Ok(Ok(())) => {
                self.metrics.status.record(1, &[KeyValue::new("component", "storage")]);
                Ok(StorageHealth::Ok)
            }
            Ok(Err(e)) => {
                self.metrics.status.record(0, &[KeyValue::new("component", "storage")]);
                Err(format!("Storage connection failed: {e}"))
            }
            Err(_) => {
                self.metrics.status.record(0, &[KeyValue::new("component", "storage")]);
                Err("Storage connection timed out".to_string())
            }
        }
    }
}
