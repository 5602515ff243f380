//! A terminal list panel that animates height changes.
//!
//! The panel sits bottom-anchored above a status bar; growing or shrinking
//! it does not re-render the live list every frame — the widget captures one
//! offscreen frame and slides a cropped window of it until the transition
//! ends.  Run the binary and press `+`/`-` to see it.

mod app;
mod core;
mod ui;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing::warn;

use crate::app::{
    cards::CardDeck,
    event::{event_channel, spawn_event_reader, AppEvent, FrameTimer, FRAME_INTERVAL},
    handler,
    state::AppState,
};
use crate::ui::{
    animated_list::{AnimatedList, AnimatedListState, LayoutEvent},
    layout::AppLayout,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Animated height-transition list panel")]
struct Cli {
    /// Number of demo cards in the list.
    #[arg(long, default_value_t = 30)]
    items: usize,

    /// Animation duration in milliseconds.
    #[arg(long, default_value_t = 300)]
    duration: u64,

    /// Rows grown/shrunk per keypress.
    #[arg(long, default_value_t = 6)]
    step: i32,

    /// Blank rows between cards.
    #[arg(long, default_value_t = 1)]
    spacing: u16,

    /// Initial panel height in rows.
    #[arg(long, default_value_t = 10)]
    height: i32,

    /// Interpolation curve.
    #[arg(long, value_enum, default_value_t = CurveArg::Ease)]
    curve: CurveArg,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CurveArg {
    /// Ease-in-ease-out (default).
    Ease,
    /// Constant speed.
    Linear,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the drawn screen
        .init();

    let cli = Cli::parse();

    // ── build initial state ───────────────────────────────────
    let deck = CardDeck::generate(cli.items, 0);
    let mut panel = AnimatedListState::new(cli.height.max(1), cli.spacing);
    panel.set_duration(Duration::from_millis(cli.duration));
    if matches!(cli.curve, CurveArg::Linear) {
        panel.set_curve(crate::core::curve::linear);
    }
    panel.reload(&deck)?;
    let mut state = AppState::new(deck, panel, cli.step.max(1));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let (tx, mut events) = event_channel();
    spawn_event_reader(tx.clone(), Duration::from_millis(100));
    let mut frame_timer: Option<FrameTimer> = None;

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area(), state.panel.height());
            state.avail_rows = layout.avail_rows;

            frame
                .buffer_mut()
                .set_style(layout.panel_area, Theme::panel_style());
            frame.render_stateful_widget(
                AnimatedList::new(&state.deck),
                layout.panel_area,
                &mut state.panel,
            );

            let style = if state.status_message.is_some() {
                Theme::status_alert_style()
            } else {
                Theme::status_bar_style()
            };
            let status = Paragraph::new(state.status_line()).style(style);
            frame.render_widget(status, layout.status_area);
        })?;

        // ── layout-complete hook ──────────────────────────────
        // The draw above applied any pending resize/reposition, so deferred
        // work (clock start, post-shrink scroll correction) runs now.
        for event in state.panel.on_layout_complete(Instant::now()) {
            match event {
                LayoutEvent::AnimationStarted => {
                    if frame_timer.is_none() {
                        frame_timer = Some(FrameTimer::start(tx.clone(), FRAME_INTERVAL));
                    }
                }
                LayoutEvent::CaptureFailed(err) => {
                    warn!(%err, "animation attempt abandoned");
                    state.status_message = Some(format!(" {err}"));
                }
            }
        }

        match events.recv().await {
            None => break,
            Some(AppEvent::Key(key)) => handler::handle_key(&mut state, key),
            Some(AppEvent::Frame) => {
                if state.panel.tick(Instant::now()) == crate::core::engine::TickOutcome::Finished {
                    if let Some(timer) = frame_timer.take() {
                        timer.stop();
                    }
                }
            }
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) => {}
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
