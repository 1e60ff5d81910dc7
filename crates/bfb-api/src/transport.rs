// Shared transport configuration for building the reqwest::Client.

use std::time::Duration;

use crate::error::Error;

/// Settings applied to the HTTP client.
///
/// The portal client has no timeout policy of its own; `timeout` is only
/// set when the user configures one.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("bfb/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| Error::Build(format!("failed to build HTTP client: {e}")))
    }
}
