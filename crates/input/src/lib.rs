//! Input module - terminal key events to abstract game actions
//!
//! The game machine consumes one [`UserAction`](brick_tetris_types::UserAction)
//! symbol per tick; this crate owns the mapping from raw crossterm key codes
//! to those symbols so the core never sees a key code.

pub mod map;

pub use map::{map_key, should_quit};
