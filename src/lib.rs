//! Brick-game Tetris (workspace facade crate).
//!
//! This package keeps the `brick_tetris::{core,input,store,term,types}`
//! public API stable while the implementation lives in dedicated crates
//! under `crates/`.

pub use brick_tetris_core as core;
pub use brick_tetris_input as input;
pub use brick_tetris_store as store;
pub use brick_tetris_term as term;
pub use brick_tetris_types as types;
