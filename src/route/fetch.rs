use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use tracing::warn;

use crate::ServerState;
use crate::forward::inbound_body::{decode_inbound_body, reads_body};

pub(crate) async fn fetch(State(state): State<ServerState>, request: Request) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let content_type = content_type.as_deref();

    // Only decoded media types are buffered, and only they are subject to the body limit.
    let json = if reads_body(content_type) {
        let body = match Bytes::from_request(request, &state).await {
            Ok(body) => body,
            Err(rejection) => {
                warn!("Failed to read request body: {rejection}");
                return rejection.into_response();
            }
        };

        match decode_inbound_body(content_type, &body) {
            Ok(json) => json,
            Err(err) => {
                warn!("Rejected request body: {err}");
                return err.into_response();
            }
        }
    } else {
        Value::Object(Map::new())
    };

    state
        .json_api_forwarder
        .forward_json(json)
        .await
        .into_response()
}
