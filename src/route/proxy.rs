use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};

use crate::ServerState;

pub(crate) const PROXY_ROUTE_PREFIX: &str = "/api/proxy/";

/// The target is taken from the raw path so it is decoded exactly once, by the relay.
pub(crate) async fn proxy(State(state): State<ServerState>, uri: Uri) -> Response {
    let encoded_target = uri
        .path()
        .strip_prefix(PROXY_ROUTE_PREFIX)
        .unwrap_or_default();

    match state.url_relay.relay(encoded_target).await {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}
