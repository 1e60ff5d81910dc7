//! Application core: event loop, page activation, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use bfb_core::{MutationDispatcher, Notice, NoticeLevel, Notifier, PageController, Portal, Synchronizer};

use crate::action::{Action, ActivatedPage, InputError, Mutation};
use crate::bridge::{self, ChannelNotifier};
use crate::component::Component;
use crate::event::{self, Event, Rates};
use crate::screen::ScreenId;
use crate::screens::create_screen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Where a page's controller is in its one-time activation.
enum Activation {
    /// Not visited yet.
    Pending(Box<PageController>),
    /// The activation task owns the controller.
    Running,
    /// Loaded; holding the controller keeps its refresh timer alive.
    Done(Box<PageController>),
}

/// Per-page handles taken before the controller moves into its
/// activation task.
struct PageSlot {
    dispatcher: MutationDispatcher,
    sync: Synchronizer,
    activation: Activation,
}

/// Top-level application state and event loop.
pub struct App {
    slots: HashMap<ScreenId, PageSlot>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    active_screen: ScreenId,
    running: bool,
    help_visible: bool,
    /// Mirrors the portal's loading indicator.
    loading: bool,
    throbber_state: ThrobberState,
    toast: Option<(Notice, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Stops the bridges and the event reader.
    cancel: CancellationToken,
}

impl App {
    /// Create one controller and screen per page and start the bridges.
    /// Must be called inside a tokio runtime.
    pub fn new(portal: &Portal) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let notifier: Arc<dyn Notifier> = Arc::new(ChannelNotifier::new(action_tx.clone()));

        let mut slots = HashMap::new();
        let mut screens = HashMap::new();
        for id in ScreenId::ALL {
            let controller = portal.page(id.page(), Arc::clone(&notifier));
            bridge::spawn_view_bridge(id.page(), controller.views(), action_tx.clone(), cancel.clone());
            screens.insert(id, create_screen(id, Arc::clone(controller.views())));
            slots.insert(
                id,
                PageSlot {
                    dispatcher: controller.dispatcher().clone(),
                    sync: controller.synchronizer().clone(),
                    activation: Activation::Pending(Box::new(controller)),
                },
            );
        }
        bridge::spawn_loading_bridge(portal.loading(), action_tx.clone(), cancel.clone());

        Self {
            slots,
            screens,
            active_screen: ScreenId::Dashboard,
            running: true,
            help_visible: false,
            loading: false,
            throbber_state: ThrobberState::default(),
            toast: None,
            action_tx,
            action_rx,
            cancel,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        self.activate(self.active_screen);

        let mut events = event::spawn(Rates::default(), self.cancel.child_token());

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.recv().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.send(action);
                    }
                }
                Event::Resize(w, h) => self.send(Action::Resize(w, h)),
                Event::Tick => self.send(Action::Tick),
                Event::Render => self.send(Action::Render),
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render);
                self.process_action(action)?;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.cancel.cancel();
        tui.leave();
        info!("TUI event loop ended");
        Ok(())
    }

    fn send(&self, action: Action) {
        if self.action_tx.send(action).is_err() {
            warn!("action channel closed");
        }
    }

    /// Map a key event to an action. An open form or dialog gets every
    /// key except Ctrl+C; otherwise global keys win over screen keys.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Refresh)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let target = c
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(ScreenId::from_number);
                if let Some(target) = target {
                    return Ok(Some(Action::SwitchScreen(target)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        screen.handle_key_event(key)
    }

    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                if self.loading {
                    self.throbber_state.calc_next();
                }
                if self
                    .toast
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > TOAST_TTL)
                {
                    self.toast = None;
                }
            }

            Action::SwitchScreen(target) => self.switch_screen(target),

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Refresh => self.refresh(),

            Action::PageActivated(ActivatedPage { controller, error }) => {
                let id = ScreenId::from_page(controller.page());
                debug!(screen = %id, "page activated");
                if let Some(message) = error {
                    self.show_toast(Notice::error(message));
                }
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.activation = Activation::Done(controller);
                }
            }

            Action::ViewsChanged(page) => {
                let id = ScreenId::from_page(page);
                let follow_up = match self.screens.get_mut(&id) {
                    Some(screen) => screen.update(&Action::ViewsChanged(page))?,
                    None => None,
                };
                if let Some(follow_up) = follow_up {
                    self.send(follow_up);
                }
            }

            Action::Loading(visible) => self.loading = visible,

            Action::Notify(notice) => self.show_toast(notice),

            Action::Mutate(mutation) => self.mutate(mutation),
        }

        Ok(())
    }

    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        // Mutations on other pages may have moved this page's data.
        let loaded = self
            .slots
            .get(&target)
            .is_some_and(|slot| matches!(slot.activation, Activation::Done(_)));
        if loaded {
            self.resync_page(target);
        } else {
            self.activate(target);
        }
    }

    /// Start the page's initial load on its first visit.
    fn activate(&mut self, id: ScreenId) {
        let Some(slot) = self.slots.get_mut(&id) else {
            return;
        };
        let mut controller = match std::mem::replace(&mut slot.activation, Activation::Running) {
            Activation::Pending(controller) => controller,
            other => {
                slot.activation = other;
                return;
            }
        };

        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let error = controller.activate().await.err().map(|e| e.to_string());
            let _ = tx.send(Action::PageActivated(ActivatedPage { controller, error }));
        });
    }

    /// Re-sync every view of the active page.
    fn refresh(&self) {
        self.resync_page(self.active_screen);
    }

    fn resync_page(&self, id: ScreenId) {
        let Some(slot) = self.slots.get(&id) else {
            return;
        };
        let sync = slot.sync.clone();
        let views = id.page().spec().views;
        debug!(screen = %id, "re-syncing page views");
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = sync.resync_all(views).await {
                let _ = tx.send(Action::Notify(Notice::error(e.to_string())));
            }
        });
    }

    /// Run a mutation on the active page's dispatcher. The dispatcher
    /// reports its own outcome; only unparsable input is toasted here.
    fn mutate(&self, mutation: Mutation) {
        let Some(slot) = self.slots.get(&self.active_screen) else {
            return;
        };
        let dispatcher = slot.dispatcher.clone();
        let tx = self.action_tx.clone();
        debug!(?mutation, page = %dispatcher.page(), "dispatching mutation");
        tokio::spawn(async move {
            match mutation.apply(&dispatcher).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!(error = %e, "mutation failed"),
                Err(InputError(message)) => {
                    let _ = tx.send(Action::Notify(Notice::error(message)));
                }
            }
        });
    }

    fn show_toast(&mut self, notice: Notice) {
        self.toast = Some((notice, Instant::now()));
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if let Some((notice, _)) = &self.toast {
            render_toast(frame, area, notice);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Length(14), Constraint::Min(0)]).areas(area);

        if self.loading {
            let throbber = Throbber::default()
                .label("Loading…")
                .style(Style::default().fg(theme::STEEL_BLUE))
                .throbber_style(Style::default().fg(theme::SAFETY_ORANGE));
            frame.render_stateful_widget(throbber, left, &mut self.throbber_state.clone());
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(" ● idle", Style::default().fg(theme::SUCCESS_GREEN))),
                left,
            );
        }

        let hints = widgets::hints(&[("r", "refresh"), ("?", "help"), ("q", "quit")]);
        frame.render_widget(Paragraph::new(hints), right);
    }
}

/// Toast in the bottom-right corner, above the status bar.
fn render_toast(frame: &mut Frame, area: Rect, notice: &Notice) {
    let msg_len = u16::try_from(notice.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16.min(area.height);

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (color, icon) = match notice.level {
        NoticeLevel::Success => (theme::SUCCESS_GREEN, "✓"),
        NoticeLevel::Error => (theme::ERROR_RED, "✗"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notice.message.as_str(), Style::default().fg(theme::CONCRETE)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn help_heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::STEEL_BLUE)))
}

fn help_row(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
        Span::styled(what, theme::key_hint()),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = widgets::centered(area, 56, 26);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let text = vec![
        help_heading("Global"),
        help_row("1-4", "Jump to page"),
        help_row("Tab", "Next page"),
        help_row("j/k ↑/↓", "Move selection"),
        help_row("r", "Refresh page"),
        help_row("q", "Quit"),
        Line::from(""),
        help_heading("Supplier"),
        help_row("d", "Mark delivered"),
        help_row("t", "Mark in transit"),
        help_row("l", "Delay with reason"),
        help_row("e / c", "Change ETA / quantity"),
        Line::from(""),
        help_heading("Manager"),
        help_row("h/l", "Switch pane"),
        help_row("+ / -", "Adjust stock by one"),
        help_row("t", "Low-stock threshold"),
        help_row("a", "Add site"),
        help_row("n / x", "New / delete order"),
        Line::from(""),
        help_heading("Forms"),
        help_row("Tab", "Next field"),
        help_row("←/→", "Cycle choices"),
        help_row("Enter/Esc", "Submit / cancel"),
        Line::from(""),
        Line::from(Span::styled("                  Esc or ? to close", theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}
