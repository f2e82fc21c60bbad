// src/logging_middleware.rs
//! Debug-level request/response body logging with credential redaction

use axum::body::to_bytes;
use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_json;
use crate::common::ApiError;

/// Bodies larger than this are passed through without being logged.
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// Renders a body for the log, masking `password`/`token` fields.
fn printable_body(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || bytes.len() > MAX_LOGGED_BODY {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;

    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(mut json) => {
            redact_json(&mut json);
            Some(json.to_string())
        }
        // Non-JSON bodies could carry anything; log only their size.
        Err(_) => Some(format!("<{} bytes of non-JSON body>", bytes.len())),
    }
}

fn unreadable_request_body(e: axum::Error) -> ApiError {
    debug!(error = %e, "Failed to read request body");
    ApiError::BadRequest("Request body could not be read".to_string())
}

/// Logs request and response bodies when debug logging is enabled
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, ApiError> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(unreadable_request_body)?;

    if let Some(body) = printable_body(&bytes) {
        debug!(method = %parts.method, uri = %parts.uri, request_body = %body, "📥 Request");
    }

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ApiError::InternalServer(format!("failed to buffer response body: {}", e)))?;

    if let Some(body) = printable_body(&bytes) {
        debug!(status = %parts.status, response_body = %body, "📤 Response");
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
