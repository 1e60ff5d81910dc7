//! Page-state synchronization for the BFB supply portal.
//!
//! Sits between `bfb-api` and the front ends (CLI / TUI):
//!
//! - **[`Portal`]**: session context holding the API client, the shared
//!   [`LoadingIndicator`] and the live refresh period. Vends one
//!   [`PageController`] per page.
//!
//! - **[`PageController`]**: initial load, live refresh timer, and the
//!   page's [`MutationDispatcher`]. Rendered output is published into a
//!   [`ViewStore`] of `watch` channels.
//!
//! - **[`render`]**: pure projections from records to rows, badges, the
//!   KPI panel and chart series.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod loading;
pub mod page;
pub mod portal;
pub mod render;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_REFRESH_INTERVAL, PortalConfig};
pub use dispatch::{
    DEFAULT_SITE_STATUS, LogNotifier, MutationDispatcher, MutationKind, Notice, NoticeLevel,
    Notifier, OrderForm, Outcome,
};
pub use error::CoreError;
pub use loading::{LoadingGuard, LoadingIndicator};
pub use page::{PageController, PageId, PageSpec, PageState};
pub use portal::Portal;
pub use sync::{Synchronizer, ViewKind, ViewStore};

// Backend records pass through unchanged.
pub use bfb_api::{
    Health, InventoryLine, KpiSnapshot, Material, Order, OrderStatus, PortalClient, Site, Supplier,
};
