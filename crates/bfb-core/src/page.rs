// ── Page controllers ──
//
// A page is picked once at startup. Its controller performs the initial
// load, owns the live refresh timer and hands out the page's dispatcher.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::dispatch::{MutationDispatcher, Notifier};
use crate::error::CoreError;
use crate::loading::LoadingIndicator;
use crate::sync::{Synchronizer, ViewKind, ViewStore};

/// The four portal pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Dashboard,
    Supplier,
    Manager,
    Reports,
}

/// What a page shows and which of those views refresh on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub views: &'static [ViewKind],
    pub live: &'static [ViewKind],
}

impl PageId {
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Supplier, Self::Manager, Self::Reports];

    pub fn spec(self) -> PageSpec {
        match self {
            Self::Dashboard | Self::Reports => PageSpec {
                views: &[ViewKind::Kpi],
                live: &[],
            },
            Self::Supplier => PageSpec {
                views: &[ViewKind::Orders],
                live: &[],
            },
            Self::Manager => PageSpec {
                views: &[
                    ViewKind::Inventory,
                    ViewKind::Sites,
                    ViewKind::Orders,
                    ViewKind::References,
                ],
                live: &[ViewKind::Inventory],
            },
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Supplier => "Supplier",
            Self::Manager => "Manager",
            Self::Reports => "Reports",
        }
    }

    pub fn shows(self, view: ViewKind) -> bool {
        self.spec().views.contains(&view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Uninitialized,
    Synced,
}

// ── PageController ───────────────────────────────────────────────────

/// Drives one page for the lifetime of the browsing context.
///
/// Dropping the controller stops its refresh timer.
pub struct PageController {
    page: PageId,
    sync: Synchronizer,
    dispatcher: MutationDispatcher,
    refresh_interval: Duration,
    state: PageState,
    cancel: CancellationToken,
}

impl PageController {
    pub fn new(
        page: PageId,
        sync: Synchronizer,
        notifier: Arc<dyn Notifier>,
        refresh_interval: Duration,
    ) -> Self {
        let dispatcher = MutationDispatcher::new(sync.clone(), page, notifier);
        Self {
            page,
            sync,
            dispatcher,
            refresh_interval,
            state: PageState::Uninitialized,
            cancel: CancellationToken::new(),
        }
    }

    /// Initial load. Runs once; later calls are no-ops.
    ///
    /// The page becomes `Synced` and its timer starts even when a view
    /// failed to load; the first failure is returned for display.
    pub async fn activate(&mut self) -> Result<(), CoreError> {
        if self.state == PageState::Synced {
            return Ok(());
        }

        let spec = self.page.spec();
        info!(page = %self.page, "activating page");
        let result = self.sync.resync_all(spec.views).await;
        self.state = PageState::Synced;

        if !spec.live.is_empty() && !self.refresh_interval.is_zero() {
            debug!(
                page = %self.page,
                interval_ms = self.refresh_interval.as_millis(),
                "starting live refresh"
            );
            tokio::spawn(refresh_task(
                self.sync.clone(),
                spec.live,
                self.refresh_interval,
                self.cancel.clone(),
            ));
        }

        result
    }

    /// Re-sync every view of the page on demand.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.sync.resync_all(self.page.spec().views).await
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn dispatcher(&self) -> &MutationDispatcher {
        &self.dispatcher
    }

    pub fn views(&self) -> &Arc<ViewStore> {
        self.sync.views()
    }

    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    pub fn loading(&self) -> &LoadingIndicator {
        self.sync.loading()
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Re-sync the live views every `period` until cancelled.
async fn refresh_task(
    sync: Synchronizer,
    live: &'static [ViewKind],
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                for &kind in live {
                    if let Err(e) = sync.resync(kind).await {
                        warn!(view = %kind, error = %e, "periodic refresh failed");
                    }
                }
            }
        }
    }
    debug!("live refresh stopped");
}
