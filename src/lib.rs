pub mod cli_arguments;
pub mod forward;
pub mod http_client;
mod request_id;
mod route;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};

use crate::forward::{json_api_forwarder::JsonApiForwarder, url_relay::UrlRelay};
use crate::http_client::http_client::HttpClient;
use crate::request_id::{GatewayRequestId, UNKNOWN_REQUEST_ID, X_REQUEST_ID};
use crate::route::{fetch::fetch, proxy::proxy};

pub const FETCH_BODY_LIMIT: usize = 100 * 1024;

#[derive(Clone)]
pub struct ServerState {
    json_api_forwarder: Arc<JsonApiForwarder>,
    url_relay: Arc<UrlRelay>,
}

impl ServerState {
    pub fn new(http_client: Arc<dyn HttpClient>, upstream_url: impl Into<String>) -> Self {
        Self {
            json_api_forwarder: Arc::new(JsonApiForwarder::new(
                http_client.clone(),
                upstream_url,
            )),
            url_relay: Arc::new(UrlRelay::new(http_client)),
        }
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

/// Preflights are answered with 204 rather than the 200 `CorsLayer` produces.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    let mut response = next.run(request).await;
    if preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

pub fn router(server_state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/fetch",
            post(fetch).layer(DefaultBodyLimit::max(FETCH_BODY_LIMIT)),
        )
        .route("/api/proxy/{*url}", any(proxy))
        .with_state(server_state)
        .layer(cors())
        .layer(middleware::from_fn(preflight_no_content))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or(UNKNOWN_REQUEST_ID);

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(
            X_REQUEST_ID.clone(),
            GatewayRequestId::default(),
        ))
}
