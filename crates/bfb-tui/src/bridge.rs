//! Bridges from portal state to TUI actions.
//!
//! Background tasks forward view changes and the loading flag into the
//! action channel; the notifier turns dispatcher notices into toasts.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use bfb_core::{LoadingIndicator, Notice, Notifier, PageId, ViewStore};

use crate::action::Action;

/// Forward every re-render of `views` as `Action::ViewsChanged(page)`.
pub fn spawn_view_bridge(
    page: PageId,
    views: &Arc<ViewStore>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut changes = views.subscribe_changes();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                changed = changes.changed() => {
                    if changed.is_err() || action_tx.send(Action::ViewsChanged(page)).is_err() {
                        break;
                    }
                }
            }
        }
        debug!(page = %page, "view bridge shut down");
    });
}

/// Forward the loading flag as `Action::Loading`.
pub fn spawn_loading_bridge(
    loading: &LoadingIndicator,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut visible = loading.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                changed = visible.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let show = *visible.borrow_and_update();
                    if action_tx.send(Action::Loading(show)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

/// Delivers dispatcher notices to the app as toasts.
pub struct ChannelNotifier {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ChannelNotifier {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        let _ = self.action_tx.send(Action::Notify(notice));
    }
}
