//! Pieces module - tetromino bitmaps and rotation
//!
//! Each piece is a 4x4 bitmap of cells sharing the board's material
//! vocabulary, plus a bounding box used only where rotation needs it.
//! Rotation is pure: [`Piece::rotated`] returns a candidate and the session
//! decides whether the candidate is legal to commit.

use brick_tetris_types::{Cell, PieceKind, BOARD_WIDTH, PIECE_KINDS};

use crate::rng::SimpleRng;

/// Side length of the piece bitmap
pub const PIECE_GRID: usize = 4;

/// Spawn anchor column: bitmap horizontally centered on the board
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// A tetromino with its bitmap, bounding box and board-relative anchor
///
/// `(x, y)` addresses the top-left of the 4x4 bitmap in board coordinates.
/// `y` may be negative only for the I piece at spawn, whose painted row then
/// sits exactly on row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// 4x4 occupancy bitmap, row-major
    pub bitmap: [[Cell; PIECE_GRID]; PIECE_GRID],
    /// Shape tag
    pub kind: PieceKind,
    /// Bounding box rows, used by rotation
    pub rows: usize,
    /// Bounding box columns, used by rotation
    pub cols: usize,
    /// Anchor column of the bitmap on the board
    pub x: i8,
    /// Anchor row of the bitmap on the board
    pub y: i8,
}

impl Piece {
    /// The canonical bitmap and bounding box for a piece kind
    ///
    /// Shapes are painted on rows 0-1 of the bitmap, matching the classic
    /// layouts: I spans all four columns of row 1; O sits in columns 1-2;
    /// the three-wide shapes occupy a 3x3 box.
    pub fn canonical(kind: PieceKind) -> Self {
        let mut piece = Self {
            bitmap: [[None; PIECE_GRID]; PIECE_GRID],
            kind,
            rows: 3,
            cols: 3,
            x: 0,
            y: 0,
        };
        let ink = Some(kind);

        match kind {
            PieceKind::I => {
                piece.rows = 2;
                piece.cols = 4;
                for j in 0..4 {
                    piece.bitmap[1][j] = ink;
                }
            }
            PieceKind::O => {
                piece.rows = 2;
                piece.cols = 2;
                for j in 1..3 {
                    piece.bitmap[0][j] = ink;
                    piece.bitmap[1][j] = ink;
                }
            }
            PieceKind::L => {
                piece.bitmap[0][2] = ink;
                for j in 0..3 {
                    piece.bitmap[1][j] = ink;
                }
            }
            PieceKind::J => {
                piece.bitmap[0][0] = ink;
                for j in 0..3 {
                    piece.bitmap[1][j] = ink;
                }
            }
            PieceKind::S => {
                for j in 1..3 {
                    piece.bitmap[0][j] = ink;
                }
                for j in 0..2 {
                    piece.bitmap[1][j] = ink;
                }
            }
            PieceKind::Z => {
                for j in 0..2 {
                    piece.bitmap[0][j] = ink;
                }
                for j in 1..3 {
                    piece.bitmap[1][j] = ink;
                }
            }
            PieceKind::T => {
                piece.bitmap[0][1] = ink;
                for j in 0..3 {
                    piece.bitmap[1][j] = ink;
                }
            }
        }

        piece
    }

    /// Clear the bitmap without touching position or type
    ///
    /// Used to blank a slot before it is overwritten.
    pub fn reset(&mut self) {
        self.bitmap = [[None; PIECE_GRID]; PIECE_GRID];
    }

    /// Iterate the absolute board coordinates of every painted bitmap cell
    pub fn painted_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..PIECE_GRID).flat_map(move |i| {
            (0..PIECE_GRID).filter_map(move |j| {
                self.bitmap[i][j].map(|_| (self.x + j as i8, self.y + i as i8))
            })
        })
    }

    /// Return a 90-degree rotated candidate of this piece
    ///
    /// - O is rotation-invariant and returned unchanged.
    /// - I swaps row 1 with column 1 of its bitmap and flips its bounding
    ///   box, but only while the bitmap is not above the board (`y >= 0`).
    /// - Every other shape gets a transpose-reflection confined to its
    ///   `rows x cols` sub-rectangle.
    ///
    /// The candidate keeps this piece's position. Legality (overlap, bounds,
    /// wall kicks) is the caller's concern.
    pub fn rotated(&self) -> Self {
        let mut piece = *self;

        match self.kind {
            PieceKind::O => {}
            PieceKind::I => {
                if self.y >= 0 {
                    for i in 0..PIECE_GRID {
                        let tmp = piece.bitmap[1][i];
                        piece.bitmap[1][i] = piece.bitmap[i][1];
                        piece.bitmap[i][1] = tmp;
                    }
                    piece.rows = self.cols;
                    piece.cols = self.rows;
                }
            }
            _ => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        piece.bitmap[i][j] = self.bitmap[self.cols - 1 - j][i];
                    }
                }
            }
        }

        piece
    }
}

/// Draw a piece uniformly from the seven-shape catalog
pub fn generate(rng: &mut SimpleRng) -> Piece {
    let kind = PIECE_KINDS[rng.next_range(PIECE_KINDS.len() as u32) as usize];
    Piece::canonical(kind)
}
