//! Read-only session export consumed by rendering
//!
//! Rendering never touches the session itself: the session copies its
//! observable state into a [`GameSnapshot`] and the view layer works from
//! that. `snapshot_into` lets a caller reuse one allocation-free snapshot
//! value across frames.

use brick_tetris_types::{Cell, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::pieces::Piece;

/// A complete, immutable view of a session at one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Locked board cells, row-major
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Piece under player control; absent outside of play
    pub current: Option<Piece>,
    /// Preview of the piece spawning next
    pub next: Piece,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    /// Forced-descent interval in milliseconds
    pub speed: u32,
    /// Derived from the phase; kept for renderers that only need the flag
    pub paused: bool,
    pub phase: Phase,
}

impl GameSnapshot {
    /// Whether gameplay is advancing (not on a menu, not paused, not over)
    pub fn playable(&self) -> bool {
        matches!(
            self.phase,
            Phase::Spawn | Phase::Moving | Phase::Shifting | Phase::Attaching
        )
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: Piece::canonical(PieceKind::I),
            score: 0,
            high_score: 0,
            level: 1,
            speed: 0,
            paused: false,
            phase: Phase::Start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_not_playable() {
        let snapshot = GameSnapshot::default();
        assert!(!snapshot.playable());
        assert!(!snapshot.paused);
    }

    #[test]
    fn playable_covers_gameplay_phases() {
        let mut snapshot = GameSnapshot::default();
        for phase in [Phase::Spawn, Phase::Moving, Phase::Shifting, Phase::Attaching] {
            snapshot.phase = phase;
            assert!(snapshot.playable(), "{:?}", phase);
        }
        for phase in [Phase::Start, Phase::Paused, Phase::GameOver, Phase::Exit] {
            snapshot.phase = phase;
            assert!(!snapshot.playable(), "{:?}", phase);
        }
    }
}
