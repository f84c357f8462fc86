use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::http_client::{
    error::{Error, HttpClientErrorChecker},
    http_client::HttpClient,
    request::{Request, RequestHeaders, RequestMethod},
    response::Response,
};

/// `HttpClient` backed by a shared `reqwest::Client`.
///
/// The default client has no request timeout and follows redirects, so only the
/// final response of a redirect chain is returned.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, Error> {
        debug!("Sending {} {}", request.method, request.url);

        let reqwest_response = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers.into())
            .body(request.body)
            .send()
            .await
            .map_err(Error::from)?;

        let http_status = reqwest_response.status().as_u16();

        let headers: RequestHeaders = reqwest_response.headers().into();

        let body = reqwest_response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Response {
            status: http_status,
            headers,
            body,
        })
    }
}

impl HttpClientErrorChecker for reqwest::Error {
    fn is_timeout(&self) -> bool {
        self.is_timeout()
    }

    fn is_connect(&self) -> bool {
        self.is_connect()
    }

    fn is_request(&self) -> bool {
        self.is_request()
    }

    fn error_string(&self) -> String {
        self.to_string()
    }
}

impl From<&HeaderMap> for RequestHeaders {
    fn from(headers: &HeaderMap) -> Self {
        let map = headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect();
        RequestHeaders(map)
    }
}

impl From<RequestHeaders> for HeaderMap {
    fn from(h: RequestHeaders) -> Self {
        let mut header_map = HeaderMap::new();
        for (k, v) in h.iter() {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                header_map.insert(name, value);
            }
        }
        header_map
    }
}

impl From<RequestMethod> for reqwest::Method {
    fn from(value: RequestMethod) -> Self {
        match value {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}
