pub mod account;
pub mod studio;

use anyhow::{Context, Result};
use fashionai_common::{Config, Session};
use storefront_client::StorefrontClient;

/// Bearer token passed on the command line or through `FASHIONAI_TOKEN`.
#[derive(clap::Args, Debug, Clone)]
pub struct TokenArg {
    #[arg(long, env = "FASHIONAI_TOKEN", hide_env_values = true)]
    pub token: String,
}

impl TokenArg {
    pub fn session(&self) -> Session {
        Session::new(self.token.clone())
    }
}

pub fn storefront(config: &Config) -> Result<StorefrontClient> {
    StorefrontClient::new(&config.storefront_api_url, config.http_timeout)
        .context("building storefront client")
}
