//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation
//! logic. It has **zero dependencies** on UI, clocks other than a monotonic
//! timestamp, or I/O (high-score persistence is behind a trait), making it:
//!
//! - **Deterministic**: Same seed produces the same piece sequence
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for tick processing
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with contact/overlap queries and line clearing
//! - [`pieces`]: the seven tetromino bitmaps and pure rotation
//! - [`rng`]: seeded LCG behind uniform piece generation
//! - [`scoring`]: line-clear points, level curve and the high-score contract
//! - [`session`]: the session value and its phase machine
//! - [`snapshot`]: read-only state export for rendering
//!
//! # Game Rules
//!
//! This implementation follows the classic brick-game rules:
//!
//! - **Uniform randomizer**: every piece is an independent uniform draw
//! - **Edge-kick rotation**: a rotation protruding past a wall is nudged back
//!   inside (two cells for the I piece) or rejected outright
//! - **Hard drop**: Down sends the piece straight to its resting row
//! - **Scoring**: 100/300/700/1500 for 1-4 lines, one level per 600 points,
//!   descent speeding up by 80ms per level down to 100ms at level 10
//! - **High score**: loaded at start, persisted whenever it is beaten
//!
//! # Example
//!
//! ```
//! use brick_tetris_core::{MemoryStore, Session};
//! use brick_tetris_types::{Phase, UserAction};
//!
//! // Create a session and leave the title screen.
//! let mut session = Session::new(12345, MemoryStore::default());
//! session.handle_input(Some(UserAction::Start));
//! session.handle_input(None); // spawn runs on its own tick
//! assert_eq!(session.phase(), Phase::Moving);
//!
//! // One action per tick; None means no key arrived.
//! session.handle_input(Some(UserAction::Left));
//! session.handle_input(Some(UserAction::Down)); // hard drop
//!
//! // Rendering reads a snapshot, never the session.
//! let snapshot = session.snapshot();
//! assert!(snapshot.current.is_some());
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use brick_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Contact, Edge};
pub use pieces::{generate, Piece, SPAWN_X};
pub use rng::SimpleRng;
pub use scoring::{level_for_score, score_lines, speed_for_level, HighScoreStore, MemoryStore};
pub use session::Session;
pub use snapshot::GameSnapshot;
