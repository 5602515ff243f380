//! Terminal event abstraction and the animation frame timer.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! [`FrameTimer`] feeds the same channel with ~60Hz frame events while an
//! animation runs.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Fixed animation frame period (≈60Hz budget).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Idle heartbeat from the input reader.
    Tick,
    /// Animation frame tick from the [`FrameTimer`].
    Frame,
}

/// The shared event channel: every producer (input reader, frame timer)
/// sends into one queue so all work stays on the main loop's turn.
pub fn event_channel() -> (mpsc::UnboundedSender<AppEvent>, mpsc::UnboundedReceiver<AppEvent>) {
    mpsc::unbounded_channel()
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    tokio::spawn(async move {
        loop {
            // Use crossterm's poll with the tick rate so we can send Tick
            // events even when nothing is happening.
            let has_event = event::poll(tick_rate).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            } else {
                // No event within tick_rate — send a tick.
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });
}

/// Repeating animation timer with an explicit cancel handle.
///
/// Each period elapses only after the previous frame event was queued, so
/// ticks never reorder; drift accumulates under load rather than frames
/// being skipped.
pub struct FrameTimer {
    handle: JoinHandle<()>,
}

impl FrameTimer {
    pub fn start(tx: mpsc::UnboundedSender<AppEvent>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if tx.send(AppEvent::Frame).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Deterministically stop further frame events.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for FrameTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
