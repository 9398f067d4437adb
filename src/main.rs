//! Terminal Tetris runner (default binary).
//!
//! This is the primary gameplay entrypoint. It wires the session to
//! crossterm input, the framebuffer renderer and the file-backed
//! high-score store, and ticks the machine until it reaches the exit
//! phase.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use brick_tetris::core::Session;
use brick_tetris::input::{map_key, should_quit};
use brick_tetris::store::FileStore;
use brick_tetris::term::{FrameBuffer, GameView, TerminalRenderer};
use brick_tetris::types::{Phase, TICK_MS};

fn main() -> Result<()> {
    // Logging goes to stderr so a failed high-score save shows up after the
    // alternate screen is torn down.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u32)
        .unwrap_or(1);
    let mut session = Session::new(seed, FileStore::open_default());

    let view = GameView::default();
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = session.snapshot();

    while session.phase() != Phase::Exit {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        fb.resize(w, h);
        session.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, &mut fb);
        term.draw_swap(&mut fb)?;

        // One action per tick; poll returns early when a key arrives.
        let action = if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    map_key(key)
                }
                Event::Resize(..) => {
                    term.invalidate();
                    None
                }
                _ => None,
            }
        } else {
            None
        };

        session.handle_input(action);
    }

    Ok(())
}
