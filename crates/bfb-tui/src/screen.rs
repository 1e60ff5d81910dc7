//! Screen identifiers: one tab per portal page.

use std::fmt;

use bfb_core::PageId;

/// Identifies each TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Supplier, // 2
    Manager,  // 3
    Reports,  // 4
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 4] = [Self::Dashboard, Self::Supplier, Self::Manager, Self::Reports];

    /// Numeric key (1-4) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Supplier => 2,
            Self::Manager => 3,
            Self::Reports => 4,
        }
    }

    /// Screen from a numeric key (1-4). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Supplier),
            3 => Some(Self::Manager),
            4 => Some(Self::Reports),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn page(self) -> PageId {
        match self {
            Self::Dashboard => PageId::Dashboard,
            Self::Supplier => PageId::Supplier,
            Self::Manager => PageId::Manager,
            Self::Reports => PageId::Reports,
        }
    }

    pub fn from_page(page: PageId) -> Self {
        match page {
            PageId::Dashboard => Self::Dashboard,
            PageId::Supplier => Self::Supplier,
            PageId::Manager => Self::Manager,
            PageId::Reports => Self::Reports,
        }
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        self.page().title()
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
