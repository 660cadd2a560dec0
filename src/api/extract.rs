use crate::error::AppError;
use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Request body decoded as a JSON object, from either a JSON or a urlencoded form payload.
///
/// The decoded object is kept verbatim so it can be stored alongside the parsed record.
#[derive(Debug, Clone)]
pub struct RawBody(pub Map<String, Value>);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(req: &Request) -> bool {
    req.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE))
}

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(fields) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|_| AppError::BadRequest("invalid_body"))?;
            if fields.is_empty() {
                return Err(AppError::BadRequest("missing_text"));
            }
            return Ok(Self(fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect()));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|_| AppError::BadRequest("invalid_body"))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest("missing_text"));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(Value::Null) => Err(AppError::BadRequest("missing_text")),
            Ok(_) | Err(_) => Err(AppError::BadRequest("invalid_body")),
        }
    }
}
