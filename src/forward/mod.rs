//! Forwarding logic behind the two proxy routes.
//!
//! [`json_api_forwarder`] relays JSON bodies to the fixed upstream API and mirrors its
//! answer. [`url_relay`] fetches an arbitrary percent-encoded URL and relays the raw
//! bytes with a sanitized content-type.

pub mod content_type;
pub mod forward_request;
pub mod forward_response;
pub mod inbound_body;
pub mod json_api_forwarder;
pub mod proxy_target;
pub mod url_relay;
