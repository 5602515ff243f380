//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use crate::app::cards::CardDeck;
use crate::ui::animated_list::AnimatedListState;

/// Top-level application state.
pub struct AppState {
    /// The backing item collection (the widget's adapter).
    pub deck: CardDeck,
    /// Persistent widget state — scroll position, height, animation driver.
    pub panel: AnimatedListState,
    /// Rows added/removed per grow/shrink keypress.
    pub step: i32,
    /// Rows available to the panel, updated from the last draw's layout.
    pub avail_rows: i32,
    /// Seed for regenerating the demo deck.
    pub deck_seed: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(deck: CardDeck, panel: AnimatedListState, step: i32) -> Self {
        Self {
            deck,
            panel,
            step,
            avail_rows: 0,
            deck_seed: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// One-line summary for the status bar.
    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        format!(
            " height {}  duration {}ms{}  │  +/- grow/shrink  j/k scroll  d duration  r reload  q quit",
            self.panel.height(),
            self.panel.duration().as_millis(),
            if self.panel.is_animating() {
                "  animating…"
            } else {
                ""
            }
        )
    }
}
