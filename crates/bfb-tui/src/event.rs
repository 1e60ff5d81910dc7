//! Terminal input and timing merged into one stream of events.
//!
//! A background task reads crossterm input and two clocks: a slow tick
//! that drives the spinner and toast expiry, and a fast one that redraws.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    Tick,
    Render,
}

/// Tick and redraw periods.
#[derive(Debug, Clone, Copy)]
pub struct Rates {
    pub tick: Duration,
    pub render: Duration,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            render: Duration::from_millis(33),
        }
    }
}

/// Key presses and resizes; everything else (releases, mouse, focus,
/// paste) is dropped.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        _ => None,
    }
}

fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Start the reader. It stops when `cancel` fires, when the terminal
/// input ends, or when the receiver is dropped.
pub fn spawn(rates: Rates, cancel: CancellationToken) -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut input = EventStream::new();
        let mut tick = clock(rates.tick);
        let mut render = clock(rates.render);

        loop {
            let event = tokio::select! {
                () = cancel.cancelled() => break,

                _ = tick.tick() => Event::Tick,

                _ = render.tick() => Event::Render,

                next = input.next() => match next {
                    Some(Ok(raw)) => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(e)) => {
                        warn!(error = %e, "terminal input error");
                        continue;
                    }
                    None => break,
                },
            };

            if tx.send(event).is_err() {
                break;
            }
        }
        debug!("event reader stopped");
    });

    rx
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn only_presses_and_resizes_pass() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);

        assert!(matches!(translate(CrosstermEvent::Key(press)), Some(Event::Key(_))));
        assert!(translate(CrosstermEvent::Key(release)).is_none());
        assert!(matches!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
        assert!(translate(CrosstermEvent::FocusGained).is_none());
    }
}
