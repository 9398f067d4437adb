//! Terminal rendering module
//!
//! A small three-layer stack: [`fb`] holds a styled-character framebuffer,
//! [`game_view`] maps a session snapshot into one, and [`renderer`] flushes
//! framebuffers to the terminal with diffed redraws. Only the renderer
//! touches the terminal; the view stays pure and testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
