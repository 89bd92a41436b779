//! Request decoding.
//!
//! # Responsibilities
//! - Buffer the request body up to the configured limit
//! - Decode form and JSON bodies into a `Payload`
//! - Resolve the effective method for HTML forms (`_method` override)
//! - Read the request id assigned by the request-id layer
//!
//! # Design Decisions
//! - Unknown content types decode to an empty payload
//! - The override only applies to POST, so GET links stay safe
//! - Malformed bodies are rejected before routing

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method};
use serde_json::Value;
use thiserror::Error;

/// Header set by the request-id layer and echoed on every response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Form field carrying the overridden method.
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

/// Header alternative to the form field.
pub const X_HTTP_METHOD_OVERRIDE: &str = "x-http-method-override";

const OVERRIDABLE_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Decoded request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` pairs, in submission order.
    Form(Vec<(String, String)>),
    Json(Value),
}

impl Payload {
    /// Decode a buffered body according to its content type.
    pub fn decode(headers: &HeaderMap, body: &[u8]) -> Result<Self, PayloadError> {
        if body.is_empty() {
            return Ok(Payload::Empty);
        }

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
            .unwrap_or_default();

        match content_type.as_str() {
            "application/x-www-form-urlencoded" => {
                let pairs = url::form_urlencoded::parse(body)
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                Ok(Payload::Form(pairs))
            }
            ct if ct == "application/json" || ct.ends_with("+json") => {
                Ok(Payload::Json(serde_json::from_slice(body)?))
            }
            _ => Ok(Payload::Empty),
        }
    }

    /// First value submitted for a form field.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match self {
            Payload::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// Buffer the body, failing once it grows past `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, PayloadError> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| PayloadError::TooLarge { limit })
}

/// Method the request should be routed as.
///
/// POST requests may carry `_method` in their form body or an
/// `X-HTTP-Method-Override` header. Unknown values are ignored.
pub fn effective_method(method: &Method, headers: &HeaderMap, payload: &Payload) -> Method {
    if method != Method::POST {
        return method.clone();
    }

    let requested = payload.form_value(METHOD_OVERRIDE_PARAM).or_else(|| {
        headers
            .get(X_HTTP_METHOD_OVERRIDE)
            .and_then(|v| v.to_str().ok())
    });

    requested
        .and_then(|m| Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes()).ok())
        .filter(|m| OVERRIDABLE_METHODS.contains(m))
        .unwrap_or_else(|| method.clone())
}

/// Request id assigned upstream, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
