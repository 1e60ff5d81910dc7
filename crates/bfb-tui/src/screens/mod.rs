//! Screen implementations. Each screen is a top-level Component bound to
//! one page's view store.

pub mod dashboard;
pub mod manager;
pub mod reports;
pub mod supplier;

use std::sync::Arc;

use bfb_core::ViewStore;

use crate::component::Component;
use crate::screen::ScreenId;

/// The screen for `id`, reading from its page's view store.
pub fn create_screen(id: ScreenId, views: Arc<ViewStore>) -> Box<dyn Component> {
    match id {
        ScreenId::Dashboard => Box::new(dashboard::DashboardScreen::new(views)),
        ScreenId::Supplier => Box::new(supplier::SupplierScreen::new(views)),
        ScreenId::Manager => Box::new(manager::ManagerScreen::new(views)),
        ScreenId::Reports => Box::new(reports::ReportsScreen::new(views)),
    }
}
