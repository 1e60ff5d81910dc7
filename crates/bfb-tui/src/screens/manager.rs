//! Manager screen: inventory, sites and orders, with the forms that
//! change them.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Paragraph, TableState};

use bfb_core::render::{InventoryRow, OrderRow, References, SiteRow, Surface};
use bfb_core::{OrderForm, PageId, ViewStore};

use crate::action::{Action, Mutation};
use crate::component::Component;
use crate::widgets::form::{Field, Form, FormEvent};
use crate::widgets::{self, tables};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pane {
    #[default]
    Inventory,
    Sites,
    Orders,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Self::Inventory => Self::Sites,
            Self::Sites => Self::Orders,
            Self::Orders => Self::Inventory,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Inventory => Self::Orders,
            Self::Sites => Self::Inventory,
            Self::Orders => Self::Sites,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal {
    Threshold(u64, Form),
    NewSite(Form),
    NewOrder(Form),
    ConfirmDelete(u64),
}

pub struct ManagerScreen {
    focused: bool,
    views: Arc<ViewStore>,
    pane: Pane,
    inventory: Surface<InventoryRow>,
    sites: Surface<SiteRow>,
    orders: Surface<OrderRow>,
    references: Option<Arc<References>>,
    inventory_table: TableState,
    sites_table: TableState,
    orders_table: TableState,
    modal: Option<Modal>,
}

impl ManagerScreen {
    pub fn new(views: Arc<ViewStore>) -> Self {
        Self {
            focused: false,
            views,
            pane: Pane::default(),
            inventory: Surface::default(),
            sites: Surface::default(),
            orders: Surface::default(),
            references: None,
            inventory_table: TableState::default(),
            sites_table: TableState::default(),
            orders_table: TableState::default(),
            modal: None,
        }
    }

    fn selected_inventory(&self) -> Option<&InventoryRow> {
        self.inventory_table
            .selected()
            .and_then(|i| self.inventory.rows().get(i))
    }

    fn selected_order(&self) -> Option<&OrderRow> {
        self.orders_table
            .selected()
            .and_then(|i| self.orders.rows().get(i))
    }

    fn active_table(&mut self) -> (&mut TableState, usize) {
        match self.pane {
            Pane::Inventory => (&mut self.inventory_table, self.inventory.rows().len()),
            Pane::Sites => (&mut self.sites_table, self.sites.rows().len()),
            Pane::Orders => (&mut self.orders_table, self.orders.rows().len()),
        }
    }

    fn new_order_form(&self) -> Form {
        let refs = self.references.as_deref().cloned().unwrap_or_default();
        Form::new(
            "New order",
            vec![
                Field::choice(
                    "Site",
                    refs.sites.iter().map(|s| (s.site_id, s.site_name.clone())).collect(),
                ),
                Field::choice(
                    "Material",
                    refs.materials.iter().map(|m| (m.material_id, m.name.clone())).collect(),
                ),
                Field::choice(
                    "Supplier",
                    refs.suppliers.iter().map(|s| (s.supplier_id, s.name.clone())).collect(),
                ),
                Field::text("Quantity", ""),
                Field::text("ETA", ""),
            ],
        )
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(Modal::ConfirmDelete(id)) = self.modal {
            self.modal = None;
            return match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::Mutate(Mutation::DeleteOrder(id))),
                _ => None,
            };
        }

        let form = match self.modal.as_mut()? {
            Modal::Threshold(_, form) | Modal::NewSite(form) | Modal::NewOrder(form) => form,
            Modal::ConfirmDelete(_) => return None,
        };
        match form.handle_key(key) {
            FormEvent::Editing => None,
            FormEvent::Cancel => {
                self.modal = None;
                None
            }
            FormEvent::Submit => self.modal.take().map(|m| Action::Mutate(submit(m))),
        }
    }
}

fn submit(modal: Modal) -> Mutation {
    match modal {
        Modal::Threshold(inventory_id, form) => Mutation::SetThreshold {
            inventory_id,
            threshold: form.text(0),
        },
        Modal::NewSite(form) => {
            let status = form.text(1);
            Mutation::CreateSite {
                name: form.text(0),
                status: (!status.trim().is_empty()).then_some(status),
            }
        }
        Modal::NewOrder(form) => Mutation::CreateOrder(OrderForm {
            site_id: form.choice(0),
            material_id: form.choice(1),
            supplier_id: form.choice(2),
            quantity: form.text(3),
            eta: form.text(4),
        }),
        Modal::ConfirmDelete(id) => Mutation::DeleteOrder(id),
    }
}

impl Component for ManagerScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.modal.is_some() {
            return Ok(self.handle_modal_key(key));
        }

        Ok(match key.code {
            KeyCode::Char('l') | KeyCode::Right => {
                self.pane = self.pane.next();
                None
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.pane = self.pane.prev();
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let (state, len) = self.active_table();
                tables::move_selection(state, len, 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let (state, len) = self.active_table();
                tables::move_selection(state, len, -1);
                None
            }
            KeyCode::Char('+' | '=') if self.pane == Pane::Inventory => self
                .selected_inventory()
                .map(|row| Action::Mutate(Mutation::Increment(row.clone()))),
            KeyCode::Char('-') if self.pane == Pane::Inventory => self
                .selected_inventory()
                .map(|row| Action::Mutate(Mutation::Decrement(row.clone()))),
            KeyCode::Char('t') if self.pane == Pane::Inventory => {
                if let Some(row) = self.selected_inventory() {
                    let current = row.low_threshold.map(|t| t.to_string()).unwrap_or_default();
                    let form = Form::new(
                        format!("Low-stock threshold for #{}", row.inventory_id),
                        vec![Field::text("Threshold", current)],
                    );
                    self.modal = Some(Modal::Threshold(row.inventory_id, form));
                }
                None
            }
            KeyCode::Char('a') if self.pane == Pane::Sites => {
                self.modal = Some(Modal::NewSite(Form::new(
                    "New site",
                    vec![Field::text("Name", ""), Field::text("Status", "")],
                )));
                None
            }
            KeyCode::Char('n') if self.pane == Pane::Orders => {
                self.modal = Some(Modal::NewOrder(self.new_order_form()));
                None
            }
            KeyCode::Char('x') if self.pane == Pane::Orders => {
                if let Some(id) = self.selected_order().map(|o| o.order_id) {
                    self.modal = Some(Modal::ConfirmDelete(id));
                }
                None
            }
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ViewsChanged(PageId::Manager) = action {
            self.inventory = self.views.inventory();
            self.sites = self.views.sites();
            self.orders = self.views.orders();
            self.references = self.views.references();
            tables::clamp_selection(&mut self.inventory_table, self.inventory.rows().len());
            tables::clamp_selection(&mut self.sites_table, self.sites.rows().len());
            tables::clamp_selection(&mut self.orders_table, self.orders.rows().len());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

        let sections = [
            (Pane::Inventory, "Inventory", layout[0]),
            (Pane::Sites, "Sites", layout[1]),
            (Pane::Orders, "Orders", layout[2]),
        ];
        for (pane, title, rect) in sections {
            let block = widgets::panel(title, self.focused && self.pane == pane);
            let inner = block.inner(rect);
            frame.render_widget(block, rect);
            match pane {
                Pane::Inventory => {
                    tables::render_inventory(frame, inner, &self.inventory, &self.inventory_table);
                }
                Pane::Sites => tables::render_sites(frame, inner, &self.sites, &self.sites_table),
                Pane::Orders => tables::render_orders(frame, inner, &self.orders, &self.orders_table),
            }
        }

        let hints = match self.pane {
            Pane::Inventory => widgets::hints(&[("h/l", "pane"), ("+/-", "adjust"), ("t", "threshold")]),
            Pane::Sites => widgets::hints(&[("h/l", "pane"), ("a", "add site")]),
            Pane::Orders => widgets::hints(&[("h/l", "pane"), ("n", "new order"), ("x", "delete")]),
        };
        frame.render_widget(Paragraph::new(hints), layout[3]);

        match &self.modal {
            Some(Modal::Threshold(_, form) | Modal::NewSite(form) | Modal::NewOrder(form)) => {
                form.render(frame, area);
            }
            Some(Modal::ConfirmDelete(id)) => {
                widgets::render_confirm(frame, area, &format!("Delete order #{id}?"));
            }
            None => {}
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        self.modal.is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use bfb_core::render::{render_inventory, render_orders};
    use bfb_core::{InventoryLine, Order};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen() -> ManagerScreen {
        let views = Arc::new(ViewStore::new());
        views.publish_inventory(render_inventory(&[InventoryLine {
            inventory_id: 4,
            site_id: 3,
            site_name: "North".into(),
            material_id: 1,
            material_name: "Rebar".into(),
            qty: 5,
            low_threshold: Some(2),
            status: "OK".into(),
        }]));
        views.publish_orders(render_orders(&[Order {
            order_id: 12,
            material_id: 1,
            material_name: "Rebar".into(),
            supplier_id: None,
            supplier_name: None,
            site_id: 3,
            site_name: "North".into(),
            quantity: Some(10),
            eta: None,
            status: "SCHEDULED".into(),
            delivered_at: None,
            delay_reason: None,
        }]));
        let mut screen = ManagerScreen::new(views);
        screen.update(&Action::ViewsChanged(PageId::Manager)).unwrap();
        screen
    }

    #[test]
    fn plus_sends_increment_for_selected_line() {
        let mut screen = screen();
        let action = screen.handle_key_event(key(KeyCode::Char('+'))).unwrap();
        match action {
            Some(Action::Mutate(Mutation::Increment(row))) => {
                assert_eq!(row.inventory_id, 4);
                assert_eq!(row.increment_to, 6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let mut screen = screen();
        screen.handle_key_event(key(KeyCode::Char('l'))).unwrap();
        screen.handle_key_event(key(KeyCode::Char('l'))).unwrap();
        assert!(screen.handle_key_event(key(KeyCode::Char('x'))).unwrap().is_none());
        assert!(screen.captures_input());

        let declined = screen.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        assert!(declined.is_none());
        assert!(!screen.captures_input());

        screen.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        let confirmed = screen.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(confirmed, Some(Action::Mutate(Mutation::DeleteOrder(12)))));
    }

    #[test]
    fn new_site_with_blank_status_leaves_default_to_dispatcher() {
        let mut screen = screen();
        screen.handle_key_event(key(KeyCode::Char('l'))).unwrap();
        screen.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        for c in "East Yard".chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::Mutate(m)) => assert_eq!(
                m,
                Mutation::CreateSite {
                    name: "East Yard".into(),
                    status: None,
                }
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn new_order_without_choices_keeps_selections_empty() {
        let mut screen = screen();
        screen.pane = Pane::Orders;
        screen.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::Mutate(Mutation::CreateOrder(form))) => {
                assert_eq!(form.site_id, None);
                assert_eq!(form.material_id, None);
                assert_eq!(form.supplier_id, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
