use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    forward::{forward_request::ForwardRequest, forward_response::ForwardResponse},
    http_client::{error::Error, http_client::HttpClient},
};

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.cobalt.tools/api/json";
pub(crate) const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error(transparent)]
    Transport(#[from] Error),

    #[error("upstream answered with invalid status code {0}")]
    InvalidStatus(u16),
}

/// Relays JSON bodies to a single upstream endpoint.
///
/// Any answer the upstream gives, success or not, is mirrored back. Only a failure to
/// get an answer at all becomes a 500.
pub struct JsonApiForwarder {
    http_client: Arc<dyn HttpClient>,
    upstream_url: String,
}

impl JsonApiForwarder {
    pub fn new(http_client: Arc<dyn HttpClient>, upstream_url: impl Into<String>) -> Self {
        Self {
            http_client,
            upstream_url: upstream_url.into(),
        }
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    pub async fn forward_json(&self, body: Value) -> ForwardResponse {
        match self.try_forward(ForwardRequest::new(body)).await {
            Ok(response) => {
                if response.status.is_success() {
                    info!("Request forwarded to {}", self.upstream_url);
                } else {
                    error!(
                        "Error while proxying request: upstream responded with status {}",
                        response.status.as_u16()
                    );
                }
                response
            }
            Err(err) => {
                error!("Error while proxying request: {err}");
                ForwardResponse::text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR_MESSAGE,
                )
            }
        }
    }

    async fn try_forward(&self, request: ForwardRequest) -> Result<ForwardResponse, ForwardError> {
        let response = self
            .http_client
            .execute(request.into_http_request(&self.upstream_url))
            .await?;

        let status = StatusCode::from_u16(response.status)
            .map_err(|_| ForwardError::InvalidStatus(response.status))?;
        let content_type = response.content_type().map(str::to_owned);

        Ok(ForwardResponse::passthrough(
            status,
            content_type.as_deref(),
            response.body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use http::StatusCode;
    use serde_json::json;

    use crate::{
        forward::{
            forward_response::{ForwardBody, ForwardResponse},
            json_api_forwarder::JsonApiForwarder,
        },
        http_client::{
            error::Error,
            http_client::MockHttpClient,
            request::{RequestHeaders, RequestMethod},
            response::Response,
        },
    };

    const UPSTREAM_URL: &str = "https://api.example.com/api/json";

    fn json_response(status: u16, body: &'static str) -> Response {
        Response {
            status,
            headers: RequestHeaders::from([(
                "content-type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )]),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    fn internal_error() -> ForwardResponse {
        ForwardResponse::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    #[tokio::test]
    async fn should_post_the_body_to_the_upstream_as_json() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| {
                req.method == RequestMethod::Post
                    && req.url == UPSTREAM_URL
                    && req.headers.get("content-type") == Some(&"application/json".to_string())
                    && req.headers.get("accept") == Some(&"application/json".to_string())
                    && req.body == Bytes::from_static(br#"{"url":"https://example.com/video"}"#)
            })
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"status":"success"}"#)));

        let forwarder = JsonApiForwarder::new(Arc::new(mock), UPSTREAM_URL);

        forwarder
            .forward_json(json!({"url": "https://example.com/video"}))
            .await;
    }

    #[tokio::test]
    async fn should_pass_successful_responses_through() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().returning(|_| {
            Ok(json_response(
                200,
                r#"{"status":"success","url":"https://cdn.example.com/video.mp4"}"#,
            ))
        });

        let forwarder = JsonApiForwarder::new(Arc::new(mock), UPSTREAM_URL);
        let response = forwarder
            .forward_json(json!({"url": "https://example.com/video"}))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            ForwardBody::Json(json!({
                "status": "success",
                "url": "https://cdn.example.com/video.mp4"
            }))
        );
    }

    #[tokio::test]
    async fn should_relay_upstream_errors_verbatim() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().returning(|_| {
            Ok(json_response(
                400,
                r#"{"status":"error","text":"i don't see anything i could download by your link"}"#,
            ))
        });

        let forwarder = JsonApiForwarder::new(Arc::new(mock), UPSTREAM_URL);
        let response = forwarder.forward_json(json!({"url": "nope"})).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            ForwardBody::Json(json!({
                "status": "error",
                "text": "i don't see anything i could download by your link"
            }))
        );
    }

    #[tokio::test]
    async fn should_relay_non_json_upstream_errors_as_raw_bytes() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().returning(|_| {
            Ok(Response {
                status: 502,
                headers: RequestHeaders::from([(
                    "content-type".to_string(),
                    "text/html".to_string(),
                )]),
                body: Bytes::from_static(b"<h1>Bad Gateway</h1>"),
            })
        });

        let forwarder = JsonApiForwarder::new(Arc::new(mock), UPSTREAM_URL);
        let response = forwarder.forward_json(json!({})).await;

        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.content_type, "text/html");
        assert_eq!(
            response.body,
            ForwardBody::Raw(Bytes::from_static(b"<h1>Bad Gateway</h1>"))
        );
    }

    #[tokio::test]
    async fn should_hide_every_kind_of_transport_failure_behind_a_500() {
        let failures: [fn() -> Error; 3] = [
            || Error::Network("dns error: failed to lookup address".to_string()),
            || Error::InvalidRequest("builder error".to_string()),
            || Error::Timeout,
        ];

        for failure in failures {
            let mut mock = MockHttpClient::new();
            mock.expect_execute()
                .times(1)
                .returning(move |_| Err(failure()));

            let forwarder = JsonApiForwarder::new(Arc::new(mock), UPSTREAM_URL);
            let response = forwarder
                .forward_json(json!({"url": "https://example.com/video"}))
                .await;

            assert_eq!(response, internal_error());
        }
    }

    #[test]
    fn exposes_the_injected_upstream_url() {
        let forwarder = JsonApiForwarder::new(Arc::new(MockHttpClient::new()), UPSTREAM_URL);

        assert_eq!(forwarder.upstream_url(), UPSTREAM_URL);
    }
}
