use crate::api::MgmtState;
use crate::api::schemas::health::HealthResponse;
use crate::services::health_service::StorageHealth;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Liveness probe: returns 200 OK as long as the server is running.
pub async fn livez() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe: checks connectivity to the message store.
pub async fn readyz(State(state): State<MgmtState>) -> impl IntoResponse {
    let (status_code, storage_status) = match state.health_service.check_storage().await {
        Ok(StorageHealth::Ok) => (StatusCode::OK, "ok"),
        Ok(StorageHealth::Disabled) => (StatusCode::OK, "disabled"),
        Err(e) => {
            tracing::warn!(error = %e, component = "storage", "Readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "error")
        }
    };

    let response = HealthResponse {
        status: if status_code == StatusCode::OK { "ok" } else { "error" }.to_string(),
        storage: storage_status.to_string(),
    };

    (status_code, Json(response))
}
