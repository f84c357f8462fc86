use http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub(crate) const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub(crate) const UNKNOWN_REQUEST_ID: &str = "unknown";

/// Tags every request that arrives without an `x-request-id` with a fresh UUID v4.
#[derive(Clone, Default)]
pub(crate) struct GatewayRequestId {}

impl MakeRequestId for GatewayRequestId {
    fn make_request_id<B>(&mut self, _: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
