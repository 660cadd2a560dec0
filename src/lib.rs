#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::{self, DbPool, PgSmsStore};
use crate::adapters::store::{SmsStore, UnconfiguredStore};
use crate::api::ServiceContainer;
use crate::config::{Config, DatabaseConfig};
use crate::services::health_service::HealthService;
use crate::services::ingest_service::IngestService;
use crate::services::listing_service::ListingService;
use std::sync::Arc;
use tokio::sync::watch;

/// Applies the embedded schema migrations.
///
/// # Errors
/// Returns an error if the database cannot be reached or a migration fails.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Builds the message store from configuration.
///
/// Without a database URL the service still runs: writes are acknowledged without being
/// persisted and listings return the placeholder row. A failed startup migration is logged
/// and the service keeps serving on the lazy pool.
///
/// # Errors
/// Returns an error if the URL is invalid.
pub async fn init_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn SmsStore>> {
    let Some(url) = config.url.as_deref() else {
        tracing::warn!("No database URL configured, messages will not be persisted");
        return Ok(Arc::new(UnconfiguredStore));
    };

    let pool = database::init_pool(url, config)?;
    if config.run_migrations
        && let Err(e) = run_migrations(&pool).await
    {
        tracing::error!(error = %e, "Startup migrations failed, continuing without them");
    }
    Ok(Arc::new(PgSmsStore::new(pool)))
}

/// Routes panics through `tracing` so they reach structured log sinks.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        tracing::error!(%location, %payload, "Panic occurred");
    }));
}

/// Flips `shutdown_tx` on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
}

/// Wires services around an injected message store.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn SmsStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SmsStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn build(self) -> App {
        let store = self.store.unwrap_or_else(|| Arc::new(UnconfiguredStore));

        App {
            services: ServiceContainer {
                ingest_service: IngestService::new(Arc::clone(&store)),
                listing_service: ListingService::new(Arc::clone(&store)),
            },
            health_service: HealthService::new(store, self.config.health.clone()),
        }
    }
}
