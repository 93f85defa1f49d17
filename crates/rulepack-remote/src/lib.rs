use std::time::Duration;

mod catalog;
mod fetch;

pub use catalog::{RemoteCatalog, RemoteRule, RemoteStack};
pub use fetch::HttpContentSource;

pub(crate) const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const USER_AGENT: &str = concat!("rulepack/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client() -> anyhow::Result<reqwest::blocking::Client> {
    use anyhow::Context;

    reqwest::blocking::Client::builder()
        .timeout(TRANSPORT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}

#[cfg(test)]
mod tests;
