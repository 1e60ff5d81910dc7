// ── View synchronization ──
//
// Each view is fetched, rendered and published as a full replacement.
// Published state lives in `watch` channels so subscribers always see the
// latest render; whichever render finishes last wins.

use std::sync::Arc;

use bfb_api::PortalClient;
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::loading::LoadingIndicator;
use crate::render::{
    InventoryRow, KpiView, OrderRow, References, SiteRow, Surface, View, render_inventory,
    render_orders, render_sites,
};

/// A remotely backed piece of page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Kpi,
    Orders,
    Inventory,
    Sites,
    References,
}

// ── ViewStore ────────────────────────────────────────────────────────

/// Latest rendered output of every view, one `watch` channel each.
pub struct ViewStore {
    kpi: watch::Sender<Option<Arc<KpiView>>>,
    orders: watch::Sender<Surface<OrderRow>>,
    inventory: watch::Sender<Surface<InventoryRow>>,
    sites: watch::Sender<Surface<SiteRow>>,
    references: watch::Sender<Option<Arc<References>>>,
    /// Bumped after every publish, for "something changed" listeners.
    version: watch::Sender<u64>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            kpi: watch::channel(None).0,
            orders: watch::channel(Surface::default()).0,
            inventory: watch::channel(Surface::default()).0,
            sites: watch::channel(Surface::default()).0,
            references: watch::channel(None).0,
            version: watch::channel(0).0,
        }
    }

    // ── Publishing ───────────────────────────────────────────────────

    pub fn publish_kpi(&self, view: KpiView) {
        self.kpi.send_replace(Some(Arc::new(view)));
        self.bump_version();
    }

    pub fn publish_orders(&self, view: View<OrderRow>) {
        self.orders.send_modify(|surface| surface.apply(view));
        self.bump_version();
    }

    pub fn publish_inventory(&self, view: View<InventoryRow>) {
        self.inventory.send_modify(|surface| surface.apply(view));
        self.bump_version();
    }

    pub fn publish_sites(&self, view: View<SiteRow>) {
        self.sites.send_modify(|surface| surface.apply(view));
        self.bump_version();
    }

    pub fn publish_references(&self, references: References) {
        self.references.send_replace(Some(Arc::new(references)));
        self.bump_version();
    }

    /// Toggle the empty-state block of a table view.
    pub fn show_empty_state(&self, kind: ViewKind, show: bool) {
        match kind {
            ViewKind::Orders => self.orders.send_modify(|s| s.show_empty_state(show)),
            ViewKind::Inventory => self.inventory.send_modify(|s| s.show_empty_state(show)),
            ViewKind::Sites => self.sites.send_modify(|s| s.show_empty_state(show)),
            ViewKind::Kpi | ViewKind::References => return,
        }
        self.bump_version();
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn kpi(&self) -> Option<Arc<KpiView>> {
        self.kpi.borrow().clone()
    }

    pub fn orders(&self) -> Surface<OrderRow> {
        self.orders.borrow().clone()
    }

    pub fn inventory(&self) -> Surface<InventoryRow> {
        self.inventory.borrow().clone()
    }

    pub fn sites(&self) -> Surface<SiteRow> {
        self.sites.borrow().clone()
    }

    pub fn references(&self) -> Option<Arc<References>> {
        self.references.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_kpi(&self) -> watch::Receiver<Option<Arc<KpiView>>> {
        self.kpi.subscribe()
    }

    pub fn subscribe_orders(&self) -> watch::Receiver<Surface<OrderRow>> {
        self.orders.subscribe()
    }

    pub fn subscribe_inventory(&self) -> watch::Receiver<Surface<InventoryRow>> {
        self.inventory.subscribe()
    }

    pub fn subscribe_sites(&self) -> watch::Receiver<Surface<SiteRow>> {
        self.sites.subscribe()
    }

    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

// ── Synchronizer ─────────────────────────────────────────────────────

/// Fetches views from the backend and publishes their renders.
#[derive(Clone)]
pub struct Synchronizer {
    client: PortalClient,
    loading: LoadingIndicator,
    views: Arc<ViewStore>,
}

impl Synchronizer {
    pub fn new(client: PortalClient, loading: LoadingIndicator) -> Self {
        Self {
            client,
            loading,
            views: Arc::new(ViewStore::new()),
        }
    }

    pub fn client(&self) -> &PortalClient {
        &self.client
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn views(&self) -> &Arc<ViewStore> {
        &self.views
    }

    /// Re-fetch and re-render one view. On failure the previously
    /// published render stays in place.
    pub async fn resync(&self, kind: ViewKind) -> Result<(), CoreError> {
        match kind {
            ViewKind::Kpi => {
                let kpi = {
                    let _loading = self.loading.acquire();
                    self.client.get_kpi().await?
                };
                self.views.publish_kpi(KpiView::render(&kpi));
            }
            ViewKind::Orders => {
                let orders = {
                    let _loading = self.loading.acquire();
                    self.client.list_orders(None).await?
                };
                self.views.publish_orders(render_orders(&orders));
            }
            ViewKind::Inventory => {
                let lines = {
                    let _loading = self.loading.acquire();
                    self.client.list_inventory(None).await?
                };
                self.views.publish_inventory(render_inventory(&lines));
            }
            ViewKind::Sites => {
                let sites = {
                    let _loading = self.loading.acquire();
                    self.client.list_sites().await?
                };
                self.views.publish_sites(render_sites(&sites));
            }
            ViewKind::References => {
                let references = {
                    let _loading = self.loading.acquire();
                    References {
                        materials: self.client.list_materials().await?,
                        suppliers: self.client.list_suppliers().await?,
                        sites: self.client.list_sites().await?,
                    }
                };
                self.views.publish_references(references);
            }
        }
        debug!(view = %kind, "view synced");
        Ok(())
    }

    /// Re-sync each view in turn. A failing view is logged and skipped;
    /// the first failure is returned once all views have been tried.
    pub async fn resync_all(&self, kinds: &[ViewKind]) -> Result<(), CoreError> {
        let mut first_err = None;
        for &kind in kinds {
            if let Err(e) = self.resync(kind).await {
                warn!(view = %kind, error = %e, "view sync failed");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
