use bytes::Bytes;
use serde_json::Value;

use crate::{
    forward::forward_response::APPLICATION_JSON,
    http_client::request::{Request, RequestHeaders, RequestMethod},
};

/// A JSON body on its way to the upstream API, with the headers it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    pub body: Value,
    pub headers: RequestHeaders,
}

impl ForwardRequest {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            headers: RequestHeaders::from([
                ("content-type".to_string(), APPLICATION_JSON.to_string()),
                ("accept".to_string(), APPLICATION_JSON.to_string()),
            ]),
        }
    }

    pub fn into_http_request(self, url: &str) -> Request {
        Request {
            method: RequestMethod::Post,
            url: url.to_string(),
            headers: self.headers,
            body: Bytes::from(self.body.to_string()),
        }
    }
}
