// ── Render targets ──
//
// A `View` is one render pass; a `Surface` is what a page currently
// displays. Applying a view always replaces the surface wholesale.

use serde::Serialize;

/// Output of rendering one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "lowercase")]
pub enum View<R> {
    Rows(Vec<R>),
    /// The collection was empty; show the empty-state block instead.
    Empty,
}

impl<R> View<R> {
    /// One row per record, in input order. No rows means [`View::Empty`].
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            Self::Rows(rows) => rows,
            Self::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The displayed state of one table-like view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Surface<R> {
    rows: Vec<R>,
    empty_state_visible: bool,
    rendered: bool,
}

impl<R> Default for Surface<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            empty_state_visible: false,
            rendered: false,
        }
    }
}

impl<R> Surface<R> {
    /// Replace everything with `view`. Nothing from the previous render
    /// survives.
    pub fn apply(&mut self, view: View<R>) {
        match view {
            View::Rows(rows) => {
                self.rows = rows;
                self.show_empty_state(false);
            }
            View::Empty => {
                self.rows.clear();
                self.show_empty_state(true);
            }
        }
        self.rendered = true;
    }

    /// Toggle the empty-state block.
    pub fn show_empty_state(&mut self, show: bool) {
        self.empty_state_visible = show;
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state_visible
    }

    /// `false` until the first successful render.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rows_become_empty_view() {
        let view: View<u32> = View::from_rows(Vec::new());
        assert!(view.is_empty());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn empty_render_clears_previous_rows() {
        let mut surface = Surface::default();
        surface.apply(View::from_rows(vec!["a", "b", "c"]));
        assert_eq!(surface.rows(), &["a", "b", "c"]);
        assert!(!surface.empty_state_visible());

        surface.apply(View::from_rows(Vec::new()));
        assert!(surface.rows().is_empty());
        assert!(surface.empty_state_visible());
    }

    #[test]
    fn rows_after_empty_hide_empty_state() {
        let mut surface = Surface::default();
        surface.apply(View::Empty);
        surface.apply(View::from_rows(vec![1]));
        assert_eq!(surface.rows(), &[1]);
        assert!(!surface.empty_state_visible());
    }

    #[test]
    fn new_surface_is_unrendered() {
        let surface: Surface<u8> = Surface::default();
        assert!(!surface.is_rendered());
        assert!(!surface.empty_state_visible());
    }
}
