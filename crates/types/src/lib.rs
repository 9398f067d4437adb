//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (game logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Classic brick-game playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: x = 3 (bitmap horizontally centered), y = 0
//!   (y = -1 for the I piece so its first visible row appears immediately)
//!
//! # Timing and Difficulty Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Input poll interval of the runner loop (~60 FPS) |
//! | `BASE_SPEED_MS` | 900 | Forced-descent interval at game start |
//! | `SPEED_STEP_MS` | 80 | Descent interval decrease per level |
//! | `LEVEL_SCORE_STEP` | 600 | Points required per level |
//! | `LEVEL_MIN` | 1 | Starting level |
//! | `LEVEL_MAX` | 10 | Level cap (fastest descent) |
//!
//! The descent interval for a level is `BASE_SPEED_MS - level * SPEED_STEP_MS`,
//! so level 10 descends every 100ms.
//!
//! # Line Clear Scoring
//!
//! | Lines | Points |
//! |-------|--------|
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 700 |
//! | 4 | 1500 |
//!
//! Any other count (0, or a malformed count above 4) awards nothing.
//!
//! # Examples
//!
//! ```
//! use brick_tetris_types::{PieceKind, UserAction, Phase, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! let parsed = PieceKind::from_char('t').unwrap();
//! assert_eq!(piece, parsed);
//!
//! // The machine starts on the title screen and ends in the terminal phase.
//! assert_eq!(Phase::Start, Phase::Start);
//! assert_ne!(Phase::Exit, Phase::GameOver);
//!
//! // Board dimensions are fixed.
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! # let _ = UserAction::Start;
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Input poll interval of the runner loop in milliseconds (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Forced-descent interval at game start (before the level curve applies)
pub const BASE_SPEED_MS: u32 = 900;

/// Descent interval decrease per level, in milliseconds
pub const SPEED_STEP_MS: u32 = 80;

/// Points required to advance one level
pub const LEVEL_SCORE_STEP: u32 = 600;

/// Starting level
pub const LEVEL_MIN: u32 = 1;

/// Maximum level (fastest descent)
pub const LEVEL_MAX: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines, indexed by N. Counts outside 1..=4
/// are worth nothing.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and terminal color:
/// - **I**: Red, horizontal bar
/// - **O**: Magenta, 2x2 square
/// - **L**: Yellow, L-shaped
/// - **J**: Orange, J-shaped (mirror of L)
/// - **S**: Green, S-shaped
/// - **Z**: Violet, Z-shaped (mirror of S)
/// - **T**: Blue, T-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    L,
    J,
    S,
    Z,
    T,
}

/// All piece kinds in catalog order (the order the generator draws from)
pub const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::L,
    PieceKind::J,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::T,
];

impl PieceKind {
    /// Parse piece kind from a character (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('i'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Uppercase character representation
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }
}

/// A cell on the game board or in a piece bitmap
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the given piece material
///
/// Board cells and piece bitmap cells share this vocabulary, so locking a
/// piece is a straight copy and the renderer looks colors up the same way
/// for both.
pub type Cell = Option<PieceKind>;

/// Abstract user actions consumed by the game machine
///
/// One action is consumed per tick. Mapping from raw key codes to these
/// symbols lives in the input crate; the core never sees key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// Start a new game (title screen / game over screen)
    Start,
    /// Toggle pause
    Pause,
    /// Quit the game
    Terminate,
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Reserved; not used by the current rules
    Up,
    /// Hard drop: descend until the piece rests
    Down,
    /// Rotate the piece 90 degrees
    Action,
}

/// Phases of the game machine
///
/// `Start` is the initial phase; `Exit` is terminal and absorbing.
/// `Spawn`, `Shifting` and `Attaching` are entry phases: they run their
/// effect on the next tick without consuming the tick's action.
///
/// Paused is a phase of its own rather than a flag riding alongside one,
/// so a session can never be simultaneously "paused" and mid-descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Title screen, waiting for Start
    Start,
    /// Bring the next piece into play
    Spawn,
    /// Piece under player control
    Moving,
    /// Forced one-cell descent
    Shifting,
    /// Lock the piece and settle scoring
    Attaching,
    /// Board filled up; waiting for restart or quit
    GameOver,
    /// Game frozen, timers suspended
    Paused,
    /// Terminal phase; the process may end
    Exit,
}
