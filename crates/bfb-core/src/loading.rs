// ── Loading indicator ──
//
// One process-wide visibility flag. No reference counting: overlapping
// requests share the flag and the first to finish hides it.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared "request in flight" flag.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    visible: Arc<watch::Sender<bool>>,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            visible: Arc::new(tx),
        }
    }

    pub fn show(&self) {
        self.visible.send_if_modified(|v| !std::mem::replace(v, true));
    }

    /// Idempotent.
    pub fn hide(&self) {
        self.visible.send_if_modified(|v| std::mem::replace(v, false));
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    /// Show the indicator until the returned guard is dropped.
    #[must_use = "the indicator hides as soon as the guard is dropped"]
    pub fn acquire(&self) -> LoadingGuard {
        self.show();
        LoadingGuard {
            indicator: self.clone(),
        }
    }
}

/// Hides the indicator on drop, whichever way the request ended.
#[derive(Debug)]
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}
