// ── Mutation dispatcher ──
//
// Every mutation follows the same protocol: validate locally, call the
// backend under the loading indicator, then re-sync the views the mutation
// affects on the page the dispatcher is bound to.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bfb_api::{InventoryPatch, NewOrder, NewSite, OrderPatch, OrderStatus, Site};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::page::PageId;
use crate::render::InventoryRow;
use crate::sync::{Synchronizer, ViewKind};

/// Status applied to new sites when none is given.
pub const DEFAULT_SITE_STATUS: &str = "WORKING";

// ── Notifications ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One user-facing message produced by a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Where the dispatcher reports outcomes (toast, stderr, log).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice);
    }
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "mutation applied"),
            NoticeLevel::Error => warn!(message = %notice.message, "mutation rejected"),
        }
    }
}

// ── Mutation kinds ───────────────────────────────────────────────────

/// Mutation families, keyed by which views they invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Inventory,
    OrderUpdate,
    OrderLifecycle,
    SiteCreate,
}

impl MutationKind {
    pub fn affected_views(self) -> &'static [ViewKind] {
        match self {
            Self::Inventory => &[ViewKind::Inventory, ViewKind::Kpi],
            Self::OrderUpdate => &[ViewKind::Orders, ViewKind::Kpi],
            Self::OrderLifecycle => &[ViewKind::Orders, ViewKind::Inventory, ViewKind::Kpi],
            Self::SiteCreate => &[ViewKind::Sites, ViewKind::References, ViewKind::Kpi],
        }
    }
}

/// Result of a mutation that asks for confirmation first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Declined,
}

/// Raw input of the new-order form. Selections are `None` until chosen;
/// quantity and ETA are the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub material_id: Option<u64>,
    pub supplier_id: Option<u64>,
    pub site_id: Option<u64>,
    pub quantity: String,
    pub eta: String,
}

// ── Validation ───────────────────────────────────────────────────────

fn parse_eta(raw: &str) -> Result<String, CoreError> {
    let eta = raw.trim();
    if eta.is_empty() {
        return Err(CoreError::validation("ETA is required"));
    }
    NaiveDate::parse_from_str(eta, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| {
            CoreError::validation(format!("ETA must be a date in YYYY-MM-DD form, got {eta:?}"))
        })
}

fn parse_positive_quantity(raw: &str) -> Result<i64, CoreError> {
    match raw.trim().parse::<i64>() {
        Ok(qty) if qty > 0 => Ok(qty),
        _ => Err(CoreError::validation(
            "Quantity must be a whole number greater than zero",
        )),
    }
}

impl OrderForm {
    /// Check the form and build the request body.
    pub fn validate(&self) -> Result<NewOrder, CoreError> {
        let quantity = parse_positive_quantity(&self.quantity)?;
        let (Some(site_id), Some(material_id), Some(supplier_id)) =
            (self.site_id, self.material_id, self.supplier_id)
        else {
            return Err(CoreError::validation(
                "Select a site, a material and a supplier",
            ));
        };
        let eta = parse_eta(&self.eta)?;

        Ok(NewOrder {
            material_id,
            supplier_id,
            site_id,
            eta,
            quantity,
            status: OrderStatus::Scheduled,
        })
    }
}

// ── Dispatcher ───────────────────────────────────────────────────────

/// Executes mutations for one page.
#[derive(Clone)]
pub struct MutationDispatcher {
    sync: Synchronizer,
    page: PageId,
    notifier: Arc<dyn Notifier>,
}

impl MutationDispatcher {
    pub fn new(sync: Synchronizer, page: PageId, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            sync,
            page,
            notifier,
        }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    // ── Orders ───────────────────────────────────────────────────────

    pub async fn mark_delivered(&self, order_id: u64) -> Result<(), CoreError> {
        let patch = OrderPatch {
            status: Some(OrderStatus::Delivered),
            ..OrderPatch::default()
        };
        self.execute(
            MutationKind::OrderUpdate,
            self.sync.client().update_order(order_id, &patch),
            |_| format!("Order #{order_id} marked delivered"),
        )
        .await
        .map(drop)
    }

    pub async fn mark_in_transit(&self, order_id: u64) -> Result<(), CoreError> {
        let patch = OrderPatch {
            status: Some(OrderStatus::InTransit),
            ..OrderPatch::default()
        };
        self.execute(
            MutationKind::OrderUpdate,
            self.sync.client().update_order(order_id, &patch),
            |_| format!("Order #{order_id} in transit"),
        )
        .await
        .map(drop)
    }

    /// Mark an order delayed. Both a new ETA and a reason are required.
    pub async fn delay_order(
        &self,
        order_id: u64,
        eta: &str,
        reason: &str,
    ) -> Result<(), CoreError> {
        let patch = self.checked(|| {
            let reason = reason.trim();
            if eta.trim().is_empty() || reason.is_empty() {
                return Err(CoreError::validation(
                    "A delay needs both a new ETA and a reason",
                ));
            }
            Ok(OrderPatch {
                status: Some(OrderStatus::Delayed),
                eta: Some(parse_eta(eta)?),
                delay_reason: Some(reason.to_owned()),
                quantity: None,
            })
        })?;
        self.execute(
            MutationKind::OrderUpdate,
            self.sync.client().update_order(order_id, &patch),
            |_| format!("Order #{order_id} delayed"),
        )
        .await
        .map(drop)
    }

    pub async fn update_eta(&self, order_id: u64, eta: &str) -> Result<(), CoreError> {
        let patch = self.checked(|| {
            Ok(OrderPatch {
                eta: Some(parse_eta(eta)?),
                ..OrderPatch::default()
            })
        })?;
        self.execute(
            MutationKind::OrderUpdate,
            self.sync.client().update_order(order_id, &patch),
            |_| format!("Order #{order_id} ETA updated"),
        )
        .await
        .map(drop)
    }

    pub async fn set_order_quantity(&self, order_id: u64, quantity: i64) -> Result<(), CoreError> {
        let patch = self.checked(|| {
            if quantity <= 0 {
                return Err(CoreError::validation(
                    "Quantity must be a whole number greater than zero",
                ));
            }
            Ok(OrderPatch {
                quantity: Some(quantity),
                ..OrderPatch::default()
            })
        })?;
        self.execute(
            MutationKind::OrderUpdate,
            self.sync.client().update_order(order_id, &patch),
            |_| format!("Order #{order_id} quantity set to {quantity}"),
        )
        .await
        .map(drop)
    }

    /// Create an order from form input. Returns the new order id.
    pub async fn create_order(&self, form: &OrderForm) -> Result<u64, CoreError> {
        let order = self.checked(|| form.validate())?;
        self.execute(
            MutationKind::OrderLifecycle,
            self.sync.client().create_order(&order),
            |created| format!("Order #{} created", created.order_id),
        )
        .await
        .map(|created| created.order_id)
    }

    /// Delete an order once `confirm` agrees. Declining sends nothing.
    pub async fn delete_order(
        &self,
        order_id: u64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome, CoreError> {
        if !confirm(&format!("Delete order #{order_id}?")) {
            info!(order_id, "order deletion declined");
            return Ok(Outcome::Declined);
        }
        self.execute(
            MutationKind::OrderLifecycle,
            self.sync.client().delete_order(order_id),
            |_| format!("Order #{order_id} deleted"),
        )
        .await
        .map(|_| Outcome::Applied)
    }

    // ── Inventory ────────────────────────────────────────────────────

    /// Set an inventory line to `target`. Negative targets are rejected.
    pub async fn adjust_quantity(&self, inventory_id: u64, target: i64) -> Result<(), CoreError> {
        let patch = self.checked(|| {
            if target < 0 {
                return Err(CoreError::validation("Quantity cannot go below zero"));
            }
            Ok(InventoryPatch {
                qty: Some(target),
                ..InventoryPatch::default()
            })
        })?;
        self.execute(
            MutationKind::Inventory,
            self.sync.client().update_inventory(inventory_id, &patch),
            |_| format!("Inventory #{inventory_id} set to {target}"),
        )
        .await
        .map(drop)
    }

    /// The `+` control.
    pub async fn increment(&self, row: &InventoryRow) -> Result<(), CoreError> {
        self.adjust_quantity(row.inventory_id, row.increment_to).await
    }

    /// The `-` control.
    pub async fn decrement(&self, row: &InventoryRow) -> Result<(), CoreError> {
        self.adjust_quantity(row.inventory_id, row.decrement_to).await
    }

    pub async fn set_low_threshold(
        &self,
        inventory_id: u64,
        threshold: i64,
    ) -> Result<(), CoreError> {
        let patch = self.checked(|| {
            if threshold < 0 {
                return Err(CoreError::validation(
                    "Low-stock threshold cannot be negative",
                ));
            }
            Ok(InventoryPatch {
                low_threshold: Some(threshold),
                ..InventoryPatch::default()
            })
        })?;
        self.execute(
            MutationKind::Inventory,
            self.sync.client().update_inventory(inventory_id, &patch),
            |_| format!("Inventory #{inventory_id} threshold set to {threshold}"),
        )
        .await
        .map(drop)
    }

    // ── Sites ────────────────────────────────────────────────────────

    /// Add a site. A blank status falls back to [`DEFAULT_SITE_STATUS`].
    pub async fn create_site(&self, name: &str, status: Option<&str>) -> Result<Site, CoreError> {
        let site = self.checked(|| {
            let name = name.trim();
            if name.is_empty() {
                return Err(CoreError::validation("Site name is required"));
            }
            let status = status
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SITE_STATUS)
                .to_ascii_uppercase();
            Ok(NewSite {
                site_name: name.to_owned(),
                status,
            })
        })?;
        self.execute(
            MutationKind::SiteCreate,
            self.sync.client().create_site(&site),
            |created| format!("Site \"{}\" created", created.site.site_name),
        )
        .await
        .map(|created| created.site)
    }

    // ── Protocol ─────────────────────────────────────────────────────

    /// Run local validation, reporting a failure through the notifier.
    fn checked<T>(&self, validate: impl FnOnce() -> Result<T, CoreError>) -> Result<T, CoreError> {
        validate().inspect_err(|e| {
            info!(page = %self.page, error = %e, "mutation failed validation");
            self.notifier.notify(Notice::error(e.to_string()));
        })
    }

    async fn execute<T>(
        &self,
        kind: MutationKind,
        call: impl Future<Output = Result<T, bfb_api::Error>>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, CoreError> {
        let result = {
            let _loading = self.sync.loading().acquire();
            call.await
        };

        match result {
            Ok(value) => {
                self.notifier.notify(Notice::success(describe(&value)));
                self.resync_affected(kind).await;
                Ok(value)
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(page = %self.page, error = %err, "mutation failed");
                self.notifier.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    async fn resync_affected(&self, kind: MutationKind) {
        let shown = self.page.spec().views;
        let targets: Vec<ViewKind> = kind
            .affected_views()
            .iter()
            .copied()
            .filter(|v| shown.contains(v))
            .collect();

        // The mutation already succeeded; a failed refresh only leaves the
        // previous render in place.
        if let Err(e) = self.sync.resync_all(&targets).await {
            warn!(page = %self.page, error = %e, "re-sync after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn form() -> OrderForm {
        OrderForm {
            material_id: Some(1),
            supplier_id: Some(2),
            site_id: Some(3),
            quantity: "25".into(),
            eta: "2025-12-01".into(),
        }
    }

    #[test]
    fn valid_form_builds_scheduled_order() {
        let order = form().validate().unwrap();
        assert_eq!(order.quantity, 25);
        assert_eq!(order.status, OrderStatus::Scheduled);
        assert_eq!(order.eta, "2025-12-01");
    }

    #[test]
    fn quantity_must_be_positive_integer() {
        for bad in ["0", "-3", "abc", "", "2.5"] {
            let f = OrderForm {
                quantity: bad.into(),
                ..form()
            };
            let err = f.validate().unwrap_err();
            assert!(err.is_validation(), "{bad:?} should fail validation");
        }
    }

    #[test]
    fn selections_are_required() {
        let f = OrderForm {
            supplier_id: None,
            ..form()
        };
        assert!(f.validate().unwrap_err().is_validation());
    }

    #[test]
    fn eta_must_be_a_calendar_date() {
        assert!(parse_eta("2025-02-30").is_err());
        assert!(parse_eta("tomorrow").is_err());
        assert_eq!(parse_eta(" 2025-02-03 ").unwrap(), "2025-02-03");
    }

    #[test]
    fn affected_views_cover_kpi() {
        for kind in [
            MutationKind::Inventory,
            MutationKind::OrderUpdate,
            MutationKind::OrderLifecycle,
            MutationKind::SiteCreate,
        ] {
            assert!(kind.affected_views().contains(&ViewKind::Kpi));
        }
        assert!(
            MutationKind::OrderLifecycle
                .affected_views()
                .contains(&ViewKind::Inventory)
        );
    }

    #[test]
    fn site_create_refreshes_order_form_choices() {
        let views = MutationKind::SiteCreate.affected_views();
        assert!(views.contains(&ViewKind::Sites));
        assert!(views.contains(&ViewKind::References));
    }
}
