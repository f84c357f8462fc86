use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::{HeaderValue, StatusCode, header};
use serde_json::Value;

pub(crate) const APPLICATION_JSON: &str = "application/json";
pub(crate) const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

/// Upstream body, relayed without a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardBody {
    Json(Value),
    Raw(Bytes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: ForwardBody,
}

impl ForwardResponse {
    /// Mirrors an upstream answer. Bodies that parse as JSON are tagged as such,
    /// anything else keeps the upstream's content-type and bytes.
    pub fn passthrough(status: StatusCode, content_type: Option<&str>, body: Bytes) -> Self {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Self {
                status,
                content_type: APPLICATION_JSON.to_string(),
                body: ForwardBody::Json(value),
            },
            Err(_) => Self {
                status,
                content_type: content_type.unwrap_or(TEXT_PLAIN_UTF_8).to_string(),
                body: ForwardBody::Raw(body),
            },
        }
    }

    pub fn text(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN_UTF_8.to_string(),
            body: ForwardBody::Raw(Bytes::from_static(message.as_bytes())),
        }
    }
}

impl IntoResponse for ForwardResponse {
    fn into_response(self) -> Response {
        let body = match self.body {
            ForwardBody::Json(value) => Bytes::from(value.to_string()),
            ForwardBody::Raw(bytes) => bytes,
        };

        let mut response = (self.status, body).into_response();
        let headers = response.headers_mut();
        match HeaderValue::from_str(&self.content_type) {
            Ok(value) => {
                headers.insert(header::CONTENT_TYPE, value);
            }
            Err(_) => {
                headers.remove(header::CONTENT_TYPE);
            }
        }

        response
    }
}
