//! Supplier screen: the orders table and order status changes.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Paragraph, TableState};

use bfb_core::render::{OrderRow, Surface};
use bfb_core::{PageId, ViewStore};

use crate::action::{Action, Mutation};
use crate::component::Component;
use crate::widgets::form::{Field, Form, FormEvent};
use crate::widgets::{self, tables};

/// What the open form will change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Delay(u64),
    Eta(u64),
    Quantity(u64),
}

pub struct SupplierScreen {
    focused: bool,
    views: Arc<ViewStore>,
    orders: Surface<OrderRow>,
    table: TableState,
    form: Option<(Edit, Form)>,
}

impl SupplierScreen {
    pub fn new(views: Arc<ViewStore>) -> Self {
        Self {
            focused: false,
            views,
            orders: Surface::default(),
            table: TableState::default(),
            form: None,
        }
    }

    fn selected(&self) -> Option<&OrderRow> {
        self.table.selected().and_then(|i| self.orders.rows().get(i))
    }

    fn open(&mut self, edit: Edit) {
        let Some(order) = self.selected() else {
            return;
        };
        let eta = order.eta.clone().unwrap_or_default();
        let form = match edit {
            Edit::Delay(id) => Form::new(
                format!("Delay order #{id}"),
                vec![Field::text("New ETA", eta), Field::text("Reason", "")],
            ),
            Edit::Eta(id) => Form::new(format!("ETA for order #{id}"), vec![Field::text("ETA", eta)]),
            Edit::Quantity(id) => Form::new(
                format!("Quantity for order #{id}"),
                vec![Field::text(
                    "Quantity",
                    order.quantity.map(|q| q.to_string()).unwrap_or_default(),
                )],
            ),
        };
        self.form = Some((edit, form));
    }

    fn submit(edit: Edit, form: &Form) -> Mutation {
        match edit {
            Edit::Delay(order_id) => Mutation::Delay {
                order_id,
                eta: form.text(0),
                reason: form.text(1),
            },
            Edit::Eta(order_id) => Mutation::UpdateEta {
                order_id,
                eta: form.text(0),
            },
            Edit::Quantity(order_id) => Mutation::SetOrderQuantity {
                order_id,
                quantity: form.text(0),
            },
        }
    }
}

impl Component for SupplierScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some((edit, form)) = &mut self.form {
            return Ok(match form.handle_key(key) {
                FormEvent::Editing => None,
                FormEvent::Cancel => {
                    self.form = None;
                    None
                }
                FormEvent::Submit => {
                    let mutation = Self::submit(*edit, form);
                    self.form = None;
                    Some(Action::Mutate(mutation))
                }
            });
        }

        let len = self.orders.rows().len();
        let selected_id = self.selected().map(|o| o.order_id);
        Ok(match (key.code, selected_id) {
            (KeyCode::Char('j') | KeyCode::Down, _) => {
                tables::move_selection(&mut self.table, len, 1);
                None
            }
            (KeyCode::Char('k') | KeyCode::Up, _) => {
                tables::move_selection(&mut self.table, len, -1);
                None
            }
            (KeyCode::Char('d'), Some(id)) => Some(Action::Mutate(Mutation::MarkDelivered(id))),
            (KeyCode::Char('t'), Some(id)) => Some(Action::Mutate(Mutation::MarkInTransit(id))),
            (KeyCode::Char('l'), Some(id)) => {
                self.open(Edit::Delay(id));
                None
            }
            (KeyCode::Char('e'), Some(id)) => {
                self.open(Edit::Eta(id));
                None
            }
            (KeyCode::Char('c'), Some(id)) => {
                self.open(Edit::Quantity(id));
                None
            }
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ViewsChanged(PageId::Supplier) = action {
            self.orders = self.views.orders();
            tables::clamp_selection(&mut self.table, self.orders.rows().len());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = widgets::panel("Orders", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        tables::render_orders(frame, layout[0], &self.orders, &self.table);
        frame.render_widget(
            Paragraph::new(widgets::hints(&[
                ("j/k", "navigate"),
                ("d", "delivered"),
                ("t", "in transit"),
                ("l", "delay"),
                ("e", "ETA"),
                ("c", "quantity"),
            ])),
            layout[1],
        );

        if let Some((_, form)) = &self.form {
            form.render(frame, area);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        self.form.is_some()
    }
}
