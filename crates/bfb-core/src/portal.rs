// ── Portal facade ──
//
// Shared context for every page of one session: the API client, the
// process-wide loading indicator and the refresh period.

use std::sync::Arc;
use std::time::Duration;

use bfb_api::PortalClient;

use crate::config::PortalConfig;
use crate::dispatch::Notifier;
use crate::error::CoreError;
use crate::loading::LoadingIndicator;
use crate::page::{PageController, PageId};
use crate::sync::Synchronizer;

#[derive(Clone)]
pub struct Portal {
    client: PortalClient,
    loading: LoadingIndicator,
    refresh_interval: Duration,
}

impl Portal {
    pub fn new(config: &PortalConfig) -> Result<Self, CoreError> {
        Ok(Self::with_client(config.build_client()?, config.refresh_interval))
    }

    pub fn with_client(client: PortalClient, refresh_interval: Duration) -> Self {
        Self {
            client,
            loading: LoadingIndicator::new(),
            refresh_interval,
        }
    }

    pub fn client(&self) -> &PortalClient {
        &self.client
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// A fresh, not yet activated controller for `page`.
    pub fn page(&self, page: PageId, notifier: Arc<dyn Notifier>) -> PageController {
        let sync = Synchronizer::new(self.client.clone(), self.loading.clone());
        PageController::new(page, sync, notifier, self.refresh_interval)
    }
}
