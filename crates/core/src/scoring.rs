//! Scoring module - line-clear points, level curve and high-score tracking
//!
//! Scoring rewards multi-line clears super-linearly: a quadruple clear is
//! worth three times a double. The level is a pure function of the score and
//! the descent speed a pure function of the level, so difficulty needs no
//! state of its own.

use brick_tetris_types::{BASE_SPEED_MS, LEVEL_MAX, LEVEL_MIN, LEVEL_SCORE_STEP, LINE_SCORES, SPEED_STEP_MS};

/// Points awarded for clearing `lines` rows at once
///
/// Counts outside 1..=4 award nothing; board width makes more than four
/// simultaneous clears impossible, so a larger count is malformed input
/// rather than an error.
pub fn score_lines(lines: usize) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines]
}

/// Level for a score: one level per 600 points, capped at the maximum
pub fn level_for_score(score: u32) -> u32 {
    (score / LEVEL_SCORE_STEP + LEVEL_MIN).min(LEVEL_MAX)
}

/// Forced-descent interval for a level, in milliseconds
///
/// Monotonically decreasing; level 10 descends every 100ms.
pub fn speed_for_level(level: u32) -> u32 {
    BASE_SPEED_MS - level * SPEED_STEP_MS
}

/// High-score persistence contract
///
/// The session calls `load` on (re)initialization and `save` whenever the
/// high score rises. Both are infallible at this boundary: implementations
/// log I/O failures themselves and the game continues with an unsaved
/// record. `load` returns 0 when no record exists.
pub trait HighScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, value: u32);
}

/// In-process store for headless sessions and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value
    }

    fn save(&mut self, value: u32) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(score_lines(1), 100);
        assert_eq!(score_lines(2), 300);
        assert_eq!(score_lines(3), 700);
        assert_eq!(score_lines(4), 1500);
    }

    #[test]
    fn test_malformed_line_counts_score_nothing() {
        assert_eq!(score_lines(0), 0);
        assert_eq!(score_lines(5), 0);
        assert_eq!(score_lines(100), 0);
    }

    #[test]
    fn test_level_curve() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(599), 1);
        assert_eq!(level_for_score(600), 2);
        assert_eq!(level_for_score(1200), 3);
        assert_eq!(level_for_score(1500), 3);
    }

    #[test]
    fn test_level_never_exceeds_cap() {
        assert_eq!(level_for_score(5400), 10);
        assert_eq!(level_for_score(6000), 10);
        assert_eq!(level_for_score(u32::MAX), 10);
    }

    #[test]
    fn test_speed_curve() {
        assert_eq!(speed_for_level(1), 820);
        assert_eq!(speed_for_level(3), 660);
        assert_eq!(speed_for_level(10), 100);

        // Strictly decreasing across the whole level range.
        for level in LEVEL_MIN..LEVEL_MAX {
            assert!(speed_for_level(level + 1) < speed_for_level(level));
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), 0);
        store.save(1500);
        assert_eq!(store.load(), 1500);
    }
}
