//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use bfb_core::render::InventoryRow;
use bfb_core::{CoreError, MutationDispatcher, Notice, OrderForm, PageController, PageId};

use crate::screen::ScreenId;

#[derive(Debug)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    SwitchScreen(ScreenId),
    ToggleHelp,

    /// Re-sync every view of the active page.
    Refresh,
    /// Initial load finished; the controller comes back to the app.
    PageActivated(ActivatedPage),
    /// A view of this page was re-rendered.
    ViewsChanged(PageId),
    Loading(bool),
    Notify(Notice),

    Mutate(Mutation),
}

/// A controller returned from its activation task.
pub struct ActivatedPage {
    pub controller: Box<PageController>,
    pub error: Option<String>,
}

impl fmt::Debug for ActivatedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivatedPage")
            .field("page", &self.controller.page())
            .field("error", &self.error)
            .finish()
    }
}

/// A change requested from a screen. Numbers typed into forms stay text
/// until `apply` parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    MarkDelivered(u64),
    MarkInTransit(u64),
    Delay {
        order_id: u64,
        eta: String,
        reason: String,
    },
    UpdateEta {
        order_id: u64,
        eta: String,
    },
    SetOrderQuantity {
        order_id: u64,
        quantity: String,
    },
    CreateOrder(OrderForm),
    /// Already confirmed in the dialog.
    DeleteOrder(u64),
    Increment(InventoryRow),
    Decrement(InventoryRow),
    SetThreshold {
        inventory_id: u64,
        threshold: String,
    },
    CreateSite {
        name: String,
        status: Option<String>,
    },
}

/// Why a mutation never reached the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError(pub String);

impl Mutation {
    /// Run through `dispatcher`. Backend and validation failures are
    /// already reported by the dispatcher's notifier; only text that is
    /// not a number comes back as an `InputError`.
    pub async fn apply(self, dispatcher: &MutationDispatcher) -> Result<Result<(), CoreError>, InputError> {
        let result = match self {
            Self::MarkDelivered(id) => dispatcher.mark_delivered(id).await,
            Self::MarkInTransit(id) => dispatcher.mark_in_transit(id).await,
            Self::Delay { order_id, eta, reason } => {
                dispatcher.delay_order(order_id, &eta, &reason).await
            }
            Self::UpdateEta { order_id, eta } => dispatcher.update_eta(order_id, &eta).await,
            Self::SetOrderQuantity { order_id, quantity } => {
                let quantity = parse_whole(&quantity)
                    .ok_or_else(|| InputError("Quantity must be a whole number greater than zero".into()))?;
                dispatcher.set_order_quantity(order_id, quantity).await
            }
            Self::CreateOrder(form) => dispatcher.create_order(&form).await.map(drop),
            Self::DeleteOrder(id) => dispatcher.delete_order(id, |_| true).await.map(drop),
            Self::Increment(row) => dispatcher.increment(&row).await,
            Self::Decrement(row) => dispatcher.decrement(&row).await,
            Self::SetThreshold { inventory_id, threshold } => {
                let threshold = parse_whole(&threshold)
                    .ok_or_else(|| InputError("Low-stock threshold must be a whole number".into()))?;
                dispatcher.set_low_threshold(inventory_id, threshold).await
            }
            Self::CreateSite { name, status } => {
                dispatcher.create_site(&name, status.as_deref()).await.map(drop)
            }
        };
        Ok(result)
    }
}

fn parse_whole(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_parse_with_whitespace() {
        assert_eq!(parse_whole(" 12 "), Some(12));
        assert_eq!(parse_whole("-3"), Some(-3));
        assert_eq!(parse_whole("2.5"), None);
        assert_eq!(parse_whole(""), None);
    }
}
