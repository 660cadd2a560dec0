use crate::api::AppState;
use crate::api::extract::RawBody;
use crate::api::middleware::ApiKey;
use crate::api::schemas::sms::{ListSmsQuery, ListSmsResponse, ReceiveSmsRequest, ReceiveSmsResponse};
use crate::domain::sms::ListLimit;
use crate::error::{AppError, Result};
use crate::services::ingest_service::IngestOutcome;
use crate::services::listing_service::Listing;
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;
use time::OffsetDateTime;

/// Webhook for forwarded messages.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is missing, malformed, or carries no text.
/// Returns `AppError::Database` if the store rejects the write for a reason other than an outage.
pub async fn receive_sms(
    State(state): State<AppState>,
    RawBody(raw): RawBody,
) -> Result<Json<ReceiveSmsResponse>> {
    let request: ReceiveSmsRequest =
        serde_json::from_value(Value::Object(raw.clone())).map_err(|_| AppError::BadRequest("invalid_body"))?;
    let submission = request.validate().map_err(AppError::BadRequest)?;

    let outcome = state
        .ingest_service
        .receive(submission.from, submission.to, submission.text, Some(Value::Object(raw)))
        .await?;

    let response = match outcome {
        IngestOutcome::Stored { id, .. } => ReceiveSmsResponse::stored(id),
        IngestOutcome::Unpersisted(sms) => ReceiveSmsResponse::unpersisted(sms),
    };

    Ok(Json(response))
}

/// Lists the most recently received messages, newest first.
///
/// # Errors
/// Returns `AppError::InvalidApiKey` if a key is configured and the caller's does not match.
/// Returns `AppError::Database` if stored records cannot be read back.
pub async fn list_sms(
    _key: ApiKey,
    State(state): State<AppState>,
    Query(query): Query<ListSmsQuery>,
) -> Result<Json<ListSmsResponse>> {
    let limit = ListLimit::resolve(query.limit.as_deref());

    let response = match state.listing_service.newest(limit).await? {
        Listing::Records(records) => ListSmsResponse::records(records),
        Listing::Placeholder => ListSmsResponse::placeholder(OffsetDateTime::now_utc()),
    };

    Ok(Json(response))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
