// ── Portal connection configuration ──

use std::time::Duration;

use bfb_api::{PortalClient, TransportConfig};

use crate::error::CoreError;

/// Default live refresh period for pages with live data.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Everything needed to talk to one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Base URL, e.g. `http://127.0.0.1:5000/api`.
    pub base_url: String,
    /// Live refresh period; `Duration::ZERO` disables live refresh.
    pub refresh_interval: Duration,
    /// Optional HTTP timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: bfb_api::DEFAULT_BASE_URL.to_owned(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            timeout: None,
        }
    }
}

impl PortalConfig {
    pub fn build_client(&self) -> Result<PortalClient, CoreError> {
        let transport = TransportConfig::default().with_timeout(self.timeout);
        Ok(PortalClient::new(&self.base_url, &transport)?)
    }
}
