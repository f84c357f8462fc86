use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::{error, info, warn};

use crate::{
    forward::{
        content_type::{ContentTypeError, base_media_type},
        forward_response::{ForwardBody, ForwardResponse},
        proxy_target::{DecodeError, ProxyTarget, TargetError, decode_target},
    },
    http_client::{error::Error, http_client::HttpClient, request::Request},
};

pub(crate) const INVALID_URL_MESSAGE: &str = "Invalid URL";
pub(crate) const FETCH_FAILED_MESSAGE: &str = "Failed to fetch proxied URL";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("failed to decode proxied URL: {0}")]
    InvalidUrl(#[from] DecodeError),

    #[error("invalid proxy target: {0}")]
    InvalidTarget(#[from] TargetError),

    #[error(transparent)]
    Transport(#[from] Error),

    #[error("upstream responded with status {0}")]
    UnsuccessfulStatus(u16),

    #[error(transparent)]
    ContentType(#[from] ContentTypeError),
}

impl RelayError {
    /// Decoding is the caller's fault; anything after it is reported as ours.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RelayError::InvalidUrl(_) => INVALID_URL_MESSAGE,
            _ => FETCH_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

pub struct UrlRelay {
    http_client: Arc<dyn HttpClient>,
}

impl UrlRelay {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Fetches the percent-encoded `encoded_target` and relays status, base media type
    /// and raw bytes. No other upstream header is kept.
    pub async fn relay(&self, encoded_target: &str) -> Result<ForwardResponse, RelayError> {
        let result = self.try_relay(encoded_target).await;

        match &result {
            Ok(_) => {}
            Err(err @ RelayError::InvalidUrl(_)) => warn!("Failed to decode URL: {err}"),
            Err(err) => error!("Failed to fetch proxied URL: {err}"),
        }

        result
    }

    async fn try_relay(&self, encoded_target: &str) -> Result<ForwardResponse, RelayError> {
        let decoded = decode_target(encoded_target)?;
        let target = ProxyTarget::parse(&decoded)?;

        let response = self.http_client.execute(Request::get(target.as_str())).await?;

        if !response.is_success() {
            return Err(RelayError::UnsuccessfulStatus(response.status));
        }

        let status = StatusCode::from_u16(response.status)
            .map_err(|_| RelayError::UnsuccessfulStatus(response.status))?;
        let content_type = base_media_type(response.content_type())?;

        info!(
            "Relayed {} ({} bytes, {:?})",
            target,
            response.body.len(),
            content_type
        );

        Ok(ForwardResponse {
            status,
            content_type,
            body: ForwardBody::Raw(response.body),
        })
    }
}
