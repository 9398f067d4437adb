//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O) and renders only from the read-only
//! [`GameSnapshot`], so it can be unit-tested without a terminal.
//! Each machine phase gets its own screen: the title, the playing field
//! with its statistics panel, the pause marker and the game-over panel.

use brick_tetris_core::pieces::PIECE_GRID;
use brick_tetris_core::GameSnapshot;
use brick_tetris_types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Block-letter title, drawn on the start screen.
const TITLE: [&str; 6] = [
    r" _______ ______ _______ _____  _____  _____ ",
    r"|__   __|  ____|__   __|  __ \|_   _|/ ____|",
    r"   | |  | |__     | |  | |__) | | | | (___  ",
    r"   | |  |  __|    | |  |  _  /  | |  \___ \ ",
    r"   | |  | |____   | |  | | \ \ _| |_ ____) |",
    r"   |_|  |______|  |_|  |_|  \_\_____|_____/ ",
];

/// A lightweight terminal view for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the snapshot into a fresh framebuffer.
    pub fn render(&self, snapshot: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snapshot, &mut fb);
        fb
    }

    /// Render the snapshot into an existing framebuffer, reusing its storage.
    pub fn render_into(&self, snapshot: &GameSnapshot, fb: &mut FrameBuffer) {
        fb.clear();

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = fb.width().saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = fb.height().saturating_sub(frame_h) / 2;

        if snapshot.phase == Phase::Start {
            self.draw_start_screen(fb);
            return;
        }

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, BORDER);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snapshot.board[y as usize][x as usize] {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Current piece, clipped at the top edge.
        if let Some(piece) = snapshot.current {
            for (x, y) in piece.painted_cells() {
                if y >= 0 && y < BOARD_HEIGHT as i8 && x >= 0 && x < BOARD_WIDTH as i8 {
                    self.draw_board_cell(fb, start_x, start_y, x as u16, y as u16, piece.kind);
                }
            }
        }

        let panel_x = start_x + frame_w + 3;
        match snapshot.phase {
            Phase::GameOver => self.draw_game_over(fb, snapshot, panel_x, start_y),
            Phase::Paused => {
                self.draw_statistics(fb, snapshot, panel_x, start_y);
                fb.put_str(panel_x, start_y + 12, "PAUSE", style(RED, true));
            }
            _ => self.draw_statistics(fb, snapshot, panel_x, start_y),
        }
    }

    fn draw_start_screen(&self, fb: &mut FrameBuffer) {
        let art_w = TITLE[0].chars().count() as u16;
        let x = fb.width().saturating_sub(art_w) / 2;
        let y = fb.height().saturating_sub(12) / 2;

        let title = style(BLUE, true);
        for (i, line) in TITLE.iter().enumerate() {
            fb.put_str(x, y + i as u16, line, title);
        }

        let blink = CellStyle {
            blink: true,
            ..CellStyle::default()
        };
        let hint_x = fb.width().saturating_sub(18) / 2;
        fb.put_str(hint_x, y + 8, "ENTER - start game", blink);
        fb.put_str(hint_x, y + 9, "    q - exit", blink);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(70, 70, 80),
            ..CellStyle::default()
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style(piece_color(kind), true));
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_statistics(
        &self,
        fb: &mut FrameBuffer,
        snapshot: &GameSnapshot,
        panel_x: u16,
        panel_y: u16,
    ) {
        let label = style(WHITE, true);
        let value = CellStyle::default();

        fb.put_str(panel_x, panel_y, &format!("SCORE: {}", snapshot.score), label);
        fb.put_str(
            panel_x,
            panel_y + 2,
            &format!("HIGH SCORE: {}", snapshot.high_score),
            label,
        );
        fb.put_str(
            panel_x,
            panel_y + 4,
            &format!("LEVEL: {}", snapshot.level),
            label,
        );

        fb.put_str(panel_x, panel_y + 6, "NEXT:", label);
        self.draw_preview(fb, snapshot, panel_x, panel_y + 8);

        fb.put_str(panel_x, panel_y + 15, "<   >  -  move", value);
        fb.put_str(panel_x, panel_y + 16, "  v    -  drop", value);
        fb.put_str(panel_x, panel_y + 17, "SPACE  -  rotate", value);
        fb.put_str(panel_x, panel_y + 18, "  p    -  pause", value);
        fb.put_str(panel_x, panel_y + 19, "  q    -  exit", value);
    }

    /// Draw the next-piece bitmap at panel coordinates.
    fn draw_preview(&self, fb: &mut FrameBuffer, snapshot: &GameSnapshot, x: u16, y: u16) {
        for i in 0..PIECE_GRID {
            for j in 0..PIECE_GRID {
                if let Some(kind) = snapshot.next.bitmap[i][j] {
                    fb.fill_rect(
                        x + j as u16 * self.cell_w,
                        y + i as u16 * self.cell_h,
                        self.cell_w,
                        self.cell_h,
                        '█',
                        style(piece_color(kind), false),
                    );
                }
            }
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snapshot: &GameSnapshot,
        panel_x: u16,
        panel_y: u16,
    ) {
        let label = style(WHITE, true);
        fb.put_str(panel_x, panel_y, &format!("SCORE: {}", snapshot.score), label);
        fb.put_str(
            panel_x,
            panel_y + 2,
            &format!("HIGH SCORE: {}", snapshot.high_score),
            label,
        );

        fb.put_str(panel_x, panel_y + 6, "[ GAME OVER ]", style(RED, true));
        fb.put_str(
            panel_x,
            panel_y + 8,
            "BETTER LUCK NEXT TIME!",
            style(ORANGE, false),
        );
        fb.put_str(panel_x, panel_y + 10, "TRY AGAIN?", style(GREEN, false));
        fb.put_str(panel_x, panel_y + 12, "ENTER  -  YES", CellStyle::default());
        fb.put_str(panel_x, panel_y + 13, "  q    -  NO", CellStyle::default());
    }
}

/// Statistics panel width reserved right of the board frame.
const PANEL_W: u16 = 25;

const WHITE: Rgb = Rgb::new(220, 220, 220);
const RED: Rgb = Rgb::new(220, 60, 60);
const GREEN: Rgb = Rgb::new(60, 200, 60);
const BLUE: Rgb = Rgb::new(70, 110, 230);
const ORANGE: Rgb = Rgb::new(204, 110, 0);
const BORDER: CellStyle = CellStyle {
    fg: Rgb::new(200, 200, 200),
    bg: Rgb::new(0, 0, 0),
    bold: false,
    blink: false,
};

fn style(fg: Rgb, bold: bool) -> CellStyle {
    CellStyle {
        fg,
        bold,
        ..CellStyle::default()
    }
}

/// Terminal color of a piece material.
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(220, 60, 60),
        PieceKind::O => Rgb::new(255, 51, 255),
        PieceKind::L => Rgb::new(230, 230, 0),
        PieceKind::J => Rgb::new(204, 110, 0),
        PieceKind::S => Rgb::new(60, 200, 60),
        PieceKind::Z => Rgb::new(113, 26, 204),
        PieceKind::T => Rgb::new(70, 110, 230),
    }
}
