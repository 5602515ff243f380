//! Input handling — maps key events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::cards::CardDeck;
use crate::ui::list_view::ListAdapter;

use super::state::AppState;

/// Duration presets cycled by the `d` key.
const DURATIONS_MS: &[u64] = &[150, 300, 600, 1200];

/// Minimum panel height the demo will shrink to.
const MIN_HEIGHT: i32 = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    state.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,

        KeyCode::Char('+') | KeyCode::Char('=') => {
            let target = (state.panel.height() + state.step).min(state.avail_rows);
            state.panel.animate_to(target);
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            let target = (state.panel.height() - state.step).max(MIN_HEIGHT);
            state.panel.animate_to(target);
        }

        KeyCode::Down | KeyCode::Char('j') => state.panel.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => state.panel.scroll_by(-1),
        KeyCode::PageDown => state.panel.scroll_by(state.panel.height()),
        KeyCode::PageUp => state.panel.scroll_by(-state.panel.height()),

        KeyCode::Char('d') => {
            let current = state.panel.duration().as_millis() as u64;
            let next = DURATIONS_MS
                .iter()
                .cycle()
                .skip_while(|&&ms| ms != current)
                .nth(1)
                .copied()
                .unwrap_or(DURATIONS_MS[0]);
            state.panel.set_duration(Duration::from_millis(next));
        }

        KeyCode::Char('r') => {
            state.deck_seed += 1;
            let deck = CardDeck::generate(state.deck.len(), state.deck_seed);
            match state.panel.reload(&deck) {
                Ok(()) => state.deck = deck,
                Err(err) => state.status_message = Some(format!(" {err}")),
            }
        }

        _ => {}
    }
}
