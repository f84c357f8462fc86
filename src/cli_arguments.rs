use clap::Parser;

use crate::forward::json_api_forwarder::DEFAULT_UPSTREAM_URL;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArguments {
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// JSON API every `POST /api/fetch` body is forwarded to
    #[arg(short, long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,
}
