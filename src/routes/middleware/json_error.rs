use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::response::JsonApiResponse;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites plain-text error responses (unknown routes, extractor
/// rejections) into the JSON envelope. The status code is kept; responses
/// that are already JSON or HTML, and requests from browsers asking for
/// HTML, pass through untouched.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let browser = header_contains(req.headers(), header::ACCEPT, &["text/html"]);
    let response = next.run(req).await;
    let status = response.status();

    let is_error = status.is_client_error() || status.is_server_error();
    let already_rendered = header_contains(
        response.headers(),
        header::CONTENT_TYPE,
        &["json", "text/html"],
    );
    if !is_error || already_rendered || browser {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        text
    };
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), %message, "request failed");
    }

    let mut rewritten = envelope(status, message).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

fn envelope(status: StatusCode, message: String) -> JsonApiResponse<serde_json::Value> {
    JsonApiResponse {
        status: status.as_u16(),
        message,
        data: serde_json::Value::Null,
    }
}

fn header_contains(headers: &HeaderMap, name: header::HeaderName, needles: &[&str]) -> bool {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            needles.iter().any(|needle| value.contains(needle))
        })
        .unwrap_or(false)
}
