use async_trait::async_trait;

use crate::http_client::{error::Error, request::Request, response::Response};

/// Outbound side of the gateway. Every upstream call made by the forwarders goes
/// through this trait so handlers can be exercised without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, Error>;
}
