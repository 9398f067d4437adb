//! Session module - the game session and its phase machine
//!
//! One [`Session`] value owns everything a running game needs: the board,
//! the current and next pieces, scoring, the RNG and the machine phase.
//! There are no globals; callers construct a session, feed it one action
//! per tick through [`Session::handle_input`], and read it back through
//! snapshots.
//!
//! The machine follows a fixed tick discipline: `Spawn`, `Shifting` and
//! `Attaching` are entry phases that run their effect on the tick after
//! they are entered, without consuming that tick's action. The `Moving`
//! phase samples a monotonic clock after handling its action and forces a
//! descent whenever the level's interval has elapsed.

use std::time::Instant;

use brick_tetris_types::{Phase, PieceKind, UserAction, BASE_SPEED_MS, BOARD_HEIGHT, LEVEL_MIN};

use crate::board::{Board, Contact, Edge};
use crate::pieces::{self, Piece, PIECE_GRID, SPAWN_X};
use crate::rng::SimpleRng;
use crate::scoring::{self, HighScoreStore};
use crate::snapshot::GameSnapshot;

/// Upper bound on the spawn-overlap raise loop
///
/// A piece raised past this many rows is fully above the board and cannot
/// overlap anything; hitting the bound still ends the game, it only stops
/// the loop.
const RAISE_LIMIT: u8 = BOARD_HEIGHT + PIECE_GRID as u8;

/// A complete game session
///
/// Created once at program start and reinitialized in place on restart.
/// Exclusively owned by its control thread; no operation blocks.
pub struct Session {
    board: Board,
    current: Option<Piece>,
    next: Piece,
    score: u32,
    high_score: u32,
    level: u32,
    /// Milliseconds between forced descents
    speed: u32,
    /// Stamp of the last forced descent (or resume)
    timer: Instant,
    phase: Phase,
    rng: SimpleRng,
    store: Box<dyn HighScoreStore>,
}

impl Session {
    /// Create a session with a seeded piece sequence and a high-score store
    pub fn new(seed: u32, store: impl HighScoreStore + 'static) -> Self {
        let mut session = Self {
            board: Board::new(),
            current: None,
            next: Piece::canonical(PieceKind::I),
            score: 0,
            high_score: 0,
            level: LEVEL_MIN,
            speed: BASE_SPEED_MS,
            timer: Instant::now(),
            phase: Phase::Start,
            rng: SimpleRng::new(seed),
            store: Box::new(store),
        };
        session.init();
        session
    }

    /// Reinitialize the session in place
    ///
    /// Clears the board, draws a fresh preview piece from the ongoing RNG
    /// (restarts continue the piece sequence), zeroes the score, reloads the
    /// high score, resets level and speed to their base values and returns
    /// to the title phase.
    pub fn init(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = pieces::generate(&mut self.rng);
        self.score = 0;
        self.high_score = self.store.load();
        self.level = LEVEL_MIN;
        self.speed = BASE_SPEED_MS;
        self.timer = Instant::now();
        self.phase = Phase::Start;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    /// Consume one action symbol for this tick (`None` when no key arrived)
    ///
    /// Every action is total over the machine: inputs a phase does not
    /// handle are no-ops, never errors. `Exit` is absorbing.
    pub fn handle_input(&mut self, action: Option<UserAction>) {
        match self.phase {
            Phase::Start => self.on_start(action),
            Phase::Spawn => self.on_spawn(),
            Phase::Moving => self.on_moving(action),
            Phase::Shifting => self.on_shifting(),
            Phase::Attaching => self.on_attaching(),
            Phase::GameOver => self.on_game_over(action),
            Phase::Paused => self.on_paused(action),
            Phase::Exit => {}
        }
    }

    fn on_start(&mut self, action: Option<UserAction>) {
        match action {
            Some(UserAction::Start) => self.phase = Phase::Spawn,
            Some(UserAction::Terminate) => self.phase = Phase::Exit,
            _ => {}
        }
    }

    /// Bring the preview piece into play and draw its replacement
    ///
    /// A spawn landing on occupied cells is raised row by row until it no
    /// longer overlaps (so the final stack stays visible) and ends the game.
    fn on_spawn(&mut self) {
        let mut piece = self.next;
        piece.x = SPAWN_X;
        piece.y = if piece.kind == PieceKind::I { -1 } else { 0 };

        self.next.reset();
        self.next = pieces::generate(&mut self.rng);

        if self.board.overlaps(&piece) {
            let mut raised = 0;
            while self.board.overlaps(&piece) && raised < RAISE_LIMIT {
                piece.y -= 1;
                raised += 1;
            }
            self.current = Some(piece);
            self.phase = Phase::GameOver;
        } else {
            self.current = Some(piece);
            self.phase = Phase::Moving;
        }
    }

    fn on_moving(&mut self, action: Option<UserAction>) {
        match action {
            Some(UserAction::Left) => self.move_left(),
            Some(UserAction::Right) => self.move_right(),
            Some(UserAction::Down) => self.hard_drop(),
            Some(UserAction::Action) => self.rotate(),
            Some(UserAction::Pause) => self.phase = Phase::Paused,
            Some(UserAction::Terminate) => self.phase = Phase::Exit,
            _ => {}
        }

        // The descent clock shares the tick with the action, so a move or
        // rotate and a forced shift can land together. A Pause or Terminate
        // taken above must not be clobbered by a simultaneous expiry.
        if self.phase == Phase::Moving && self.timer.elapsed().as_millis() as u32 >= self.speed {
            self.timer = Instant::now();
            self.phase = Phase::Shifting;
        }
    }

    fn on_shifting(&mut self) {
        self.move_down();
        let resting = match &self.current {
            Some(piece) => self.board.contact(piece).contains(Contact::BOTTOM),
            None => true,
        };
        self.phase = if resting { Phase::Attaching } else { Phase::Moving };
    }

    fn on_attaching(&mut self) {
        if let Some(piece) = self.current {
            self.board.lock(&piece);
        }
        self.settle_lines();
        self.update_level();
        self.phase = Phase::Spawn;
    }

    fn on_paused(&mut self, action: Option<UserAction>) {
        match action {
            Some(UserAction::Pause) => {
                self.timer = Instant::now();
                self.phase = Phase::Moving;
            }
            Some(UserAction::Terminate) => self.phase = Phase::Exit,
            _ => {}
        }
    }

    fn on_game_over(&mut self, action: Option<UserAction>) {
        match action {
            Some(UserAction::Start) => {
                self.next.reset();
                self.init();
                self.phase = Phase::Spawn;
            }
            Some(UserAction::Terminate) => self.phase = Phase::Exit,
            _ => {}
        }
    }

    fn move_left(&mut self) {
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        if !self.board.contact(piece).contains(Contact::LEFT) {
            piece.x -= 1;
        }
        if Board::out_of_bounds(piece).is_some() {
            piece.x += 1;
        }
    }

    fn move_right(&mut self) {
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        if !self.board.contact(piece).contains(Contact::RIGHT) {
            piece.x += 1;
        }
        if Board::out_of_bounds(piece).is_some() {
            piece.x -= 1;
        }
    }

    /// Descend one cell unless the piece already rests
    fn move_down(&mut self) {
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        if Board::out_of_bounds(piece).is_none()
            && !self.board.contact(piece).contains(Contact::BOTTOM)
        {
            piece.y += 1;
        }
    }

    /// Descend until BOTTOM contact; bounded by the board height
    fn hard_drop(&mut self) {
        for _ in 0..BOARD_HEIGHT {
            let Some(piece) = &self.current else {
                return;
            };
            if self.board.contact(piece).contains(Contact::BOTTOM) {
                break;
            }
            self.move_down();
        }
    }

    /// Rotate the current piece, correcting edge protrusion
    ///
    /// Builds a rotated candidate, nudges it back inside when it protrudes
    /// past an edge (one cell per step, two steps for the I piece, each step
    /// gated on the opposite side being contact-free) and commits it only if
    /// the result neither overlaps nor leaves the board. A rejected rotation
    /// keeps the corrected position and discards the rotated bitmap.
    fn rotate(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        let mut candidate = current.rotated();

        if Board::out_of_bounds(&candidate) == Some(Edge::Left) {
            self.kick_right(&mut candidate);
            if candidate.kind == PieceKind::I {
                self.kick_right(&mut candidate);
            }
        }
        if Board::out_of_bounds(&candidate) == Some(Edge::Right) {
            self.kick_left(&mut candidate);
            if candidate.kind == PieceKind::I {
                self.kick_left(&mut candidate);
            }
        }

        if self.board.overlaps(&candidate) || Board::out_of_bounds(&candidate).is_some() {
            if let Some(piece) = self.current.as_mut() {
                piece.x = candidate.x;
            }
        } else {
            self.current = Some(candidate);
        }
    }

    fn kick_right(&self, candidate: &mut Piece) {
        if !self.board.contact(candidate).contains(Contact::RIGHT) {
            candidate.x += 1;
        }
    }

    fn kick_left(&self, candidate: &mut Piece) {
        if !self.board.contact(candidate).contains(Contact::LEFT) {
            candidate.x -= 1;
        }
    }

    /// Clear full rows until none remain, score the total and track the record
    fn settle_lines(&mut self) {
        let mut lines = 0;
        loop {
            let removed = self.board.clear_full_rows();
            if removed.is_empty() {
                break;
            }
            lines += removed.len();
        }

        self.score += scoring::score_lines(lines);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
    }

    fn update_level(&mut self) {
        self.level = scoring::level_for_score(self.score);
        self.speed = scoring::speed_for_level(self.level);
    }

    /// Copy the observable state into an existing snapshot
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.current;
        out.next = self.next;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.speed = self.speed;
        out.paused = self.phase == Phase::Paused;
        out.phase = self.phase;
    }

    /// Owned snapshot of the observable state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::MemoryStore;
    use brick_tetris_types::BOARD_WIDTH;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store that records every save for assertions.
    #[derive(Clone, Default)]
    struct RecordingStore {
        saves: Rc<RefCell<Vec<u32>>>,
        value: u32,
    }

    impl HighScoreStore for RecordingStore {
        fn load(&mut self) -> u32 {
            self.value
        }

        fn save(&mut self, value: u32) {
            self.saves.borrow_mut().push(value);
        }
    }

    fn session() -> Session {
        Session::new(12345, MemoryStore::default())
    }

    /// Drive the session into Moving with a known current piece.
    fn start_with(session: &mut Session, kind: PieceKind) {
        session.handle_input(Some(UserAction::Start));
        session.next = Piece::canonical(kind);
        session.handle_input(None);
        assert_eq!(session.phase, Phase::Moving);
        assert_eq!(session.current.unwrap().kind, kind);
    }

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    #[test]
    fn new_session_starts_on_title() {
        let session = session();
        assert_eq!(session.phase(), Phase::Start);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), LEVEL_MIN);
        assert_eq!(session.speed(), BASE_SPEED_MS);
        assert!(session.current().is_none());
    }

    #[test]
    fn init_loads_high_score_from_store() {
        let session = Session::new(1, MemoryStore::new(4200));
        assert_eq!(session.high_score(), 4200);
    }

    #[test]
    fn start_transitions() {
        let mut session = session();

        // Unhandled input is a no-op.
        session.handle_input(Some(UserAction::Left));
        session.handle_input(None);
        assert_eq!(session.phase(), Phase::Start);

        session.handle_input(Some(UserAction::Start));
        assert_eq!(session.phase(), Phase::Spawn);

        // The spawn entry phase runs on the next tick.
        session.handle_input(None);
        assert_eq!(session.phase(), Phase::Moving);
        let piece = session.current().unwrap();
        assert_eq!(piece.x, SPAWN_X);
    }

    #[test]
    fn terminate_reaches_exit_from_every_interactive_phase() {
        for setup in [
            Phase::Start,
            Phase::Moving,
            Phase::Paused,
            Phase::GameOver,
        ] {
            let mut session = session();
            session.phase = setup;
            session.handle_input(Some(UserAction::Terminate));
            assert_eq!(session.phase(), Phase::Exit, "from {:?}", setup);
        }
    }

    #[test]
    fn exit_is_absorbing() {
        let mut session = session();
        session.phase = Phase::Exit;
        for action in [
            Some(UserAction::Start),
            Some(UserAction::Pause),
            Some(UserAction::Down),
            None,
        ] {
            session.handle_input(action);
            assert_eq!(session.phase(), Phase::Exit);
        }
    }

    #[test]
    fn i_piece_spawns_one_row_above_the_board() {
        let mut session = session();
        start_with(&mut session, PieceKind::I);
        let piece = session.current().unwrap();
        assert_eq!(piece.y, -1);
        // Its painted row still sits on row 0.
        assert!(piece.painted_cells().all(|(_, y)| y == 0));
    }

    #[test]
    fn spawn_generates_a_fresh_preview() {
        let mut session = session();
        let preview = session.next_piece();
        session.handle_input(Some(UserAction::Start));
        session.handle_input(None);
        assert_eq!(session.current().unwrap().kind, preview.kind);
        // The preview slot was refilled.
        assert!(session
            .next_piece()
            .bitmap
            .iter()
            .flatten()
            .any(|cell| cell.is_some()));
    }

    #[test]
    fn blocked_spawn_raises_piece_and_ends_game() {
        let mut session = session();
        session.handle_input(Some(UserAction::Start));
        // Occupy the whole spawn area down to the floor.
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row(&mut session.board, y);
        }
        session.next = Piece::canonical(PieceKind::O);
        session.handle_input(None);

        assert_eq!(session.phase(), Phase::GameOver);
        let piece = session.current().unwrap();
        // Raised above the stack until clear of it.
        assert!(!session.board.overlaps(&piece));
        assert!(piece.y < 0);
    }

    #[test]
    fn moving_left_and_right() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);
        let x0 = session.current().unwrap().x;

        session.handle_input(Some(UserAction::Left));
        assert_eq!(session.current().unwrap().x, x0 - 1);

        session.handle_input(Some(UserAction::Right));
        assert_eq!(session.current().unwrap().x, x0);
    }

    #[test]
    fn movement_stops_at_the_walls() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);

        for _ in 0..2 * BOARD_WIDTH {
            session.handle_input(Some(UserAction::Left));
        }
        let piece = session.current().unwrap();
        assert!(piece.painted_cells().all(|(x, _)| x >= 0));
        assert_eq!(piece.painted_cells().map(|(x, _)| x).min(), Some(0));

        for _ in 0..2 * BOARD_WIDTH {
            session.handle_input(Some(UserAction::Right));
        }
        let piece = session.current().unwrap();
        assert_eq!(
            piece.painted_cells().map(|(x, _)| x).max(),
            Some(BOARD_WIDTH as i8 - 1)
        );
    }

    #[test]
    fn movement_stops_against_locked_cells() {
        let mut session = session();
        start_with(&mut session, PieceKind::O);
        // O paints absolute columns 4-5 at spawn; wall off column 3.
        for y in 0..BOARD_HEIGHT as i8 {
            session.board.set(3, y, Some(PieceKind::I));
        }
        session.handle_input(Some(UserAction::Left));
        assert_eq!(session.current().unwrap().x, SPAWN_X);
    }

    #[test]
    fn hard_drop_rests_on_the_floor() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);

        session.handle_input(Some(UserAction::Down));
        let piece = session.current().unwrap();
        assert!(session.board.contact(&piece).contains(Contact::BOTTOM));
        // T paints bitmap rows 0-1, so its anchor rests at row 18.
        assert_eq!(piece.y, BOARD_HEIGHT as i8 - 2);
        // Still Moving: locking happens via the descent clock.
        assert_eq!(session.phase(), Phase::Moving);
    }

    #[test]
    fn hard_drop_matches_repeated_descent() {
        let mut a = session();
        start_with(&mut a, PieceKind::J);
        let mut b = session();
        start_with(&mut b, PieceKind::J);

        a.handle_input(Some(UserAction::Down));
        for _ in 0..2 * BOARD_HEIGHT {
            b.move_down();
        }
        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn hard_drop_lands_on_a_stack() {
        let mut session = session();
        start_with(&mut session, PieceKind::O);
        fill_row(&mut session.board, 19);

        session.handle_input(Some(UserAction::Down));
        // O paints bitmap rows 0-1; resting on row 18 puts its anchor at 17.
        assert_eq!(session.current().unwrap().y, 17);
    }

    #[test]
    fn o_piece_rotation_is_a_no_op() {
        let mut session = session();
        start_with(&mut session, PieceKind::O);
        let before = session.current().unwrap();
        session.handle_input(Some(UserAction::Action));
        assert_eq!(session.current().unwrap(), before);
    }

    #[test]
    fn i_rotation_at_left_edge_is_kicked_back_in_bounds() {
        let mut session = session();
        start_with(&mut session, PieceKind::I);
        // Leave the spawn row so the I piece may rotate, then stand it up.
        session.move_down();
        session.handle_input(Some(UserAction::Action));
        let piece = session.current().unwrap();
        assert_eq!((piece.rows, piece.cols), (4, 2));

        // Flush the vertical bar against the left wall.
        for _ in 0..BOARD_WIDTH {
            session.handle_input(Some(UserAction::Left));
        }
        assert_eq!(
            session.current().unwrap().painted_cells().map(|(x, _)| x).min(),
            Some(0)
        );

        // Laying it back down protrudes left; the kick pulls it inside.
        session.handle_input(Some(UserAction::Action));
        let piece = session.current().unwrap();
        assert_eq!((piece.rows, piece.cols), (2, 4));
        assert_eq!(Board::out_of_bounds(&piece), None);
    }

    #[test]
    fn rotation_rolls_back_when_the_kick_is_blocked() {
        let mut session = session();
        start_with(&mut session, PieceKind::I);
        session.move_down();
        session.handle_input(Some(UserAction::Action));

        // Flush the vertical bar against the right wall (painted column 9).
        for _ in 0..BOARD_WIDTH {
            session.handle_input(Some(UserAction::Right));
        }
        let vertical = session.current().unwrap();
        assert_eq!(
            vertical.painted_cells().map(|(x, _)| x).max(),
            Some(BOARD_WIDTH as i8 - 1)
        );

        // Block the kick: the column left of the would-be horizontal bar.
        let row = vertical.y + 1;
        session.board.set(vertical.x - 1, row, Some(PieceKind::Z));

        session.handle_input(Some(UserAction::Action));
        let piece = session.current().unwrap();
        // Bitmap rolled back to the vertical bar, position untouched.
        assert_eq!(piece.bitmap, vertical.bitmap);
        assert_eq!((piece.rows, piece.cols), (4, 2));
        assert_eq!(piece.x, vertical.x);
    }

    #[test]
    fn pause_round_trip() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);

        session.handle_input(Some(UserAction::Pause));
        assert_eq!(session.phase(), Phase::Paused);
        assert!(session.snapshot().paused);

        // Gameplay actions are ignored while paused.
        let piece = session.current().unwrap();
        session.handle_input(Some(UserAction::Left));
        session.handle_input(Some(UserAction::Down));
        assert_eq!(session.current().unwrap(), piece);

        session.handle_input(Some(UserAction::Pause));
        assert_eq!(session.phase(), Phase::Moving);
        assert!(!session.snapshot().paused);
    }

    #[test]
    fn clock_expiry_never_clobbers_a_pause() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);
        session.speed = 0;

        session.handle_input(Some(UserAction::Pause));
        assert_eq!(session.phase(), Phase::Paused);
    }

    #[test]
    fn descent_clock_forces_a_shift() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);
        session.speed = 0;

        let y0 = session.current().unwrap().y;
        session.handle_input(None);
        assert_eq!(session.phase(), Phase::Shifting);

        session.handle_input(None);
        assert_eq!(session.phase(), Phase::Moving);
        assert_eq!(session.current().unwrap().y, y0 + 1);
    }

    #[test]
    fn resting_piece_attaches_and_respawns() {
        let mut session = session();
        start_with(&mut session, PieceKind::O);
        session.speed = 0;

        session.handle_input(Some(UserAction::Down));
        session.handle_input(None); // Moving: clock fires
        assert_eq!(session.phase(), Phase::Shifting);
        session.handle_input(None); // Shifting: resting, so attach
        assert_eq!(session.phase(), Phase::Attaching);
        session.handle_input(None); // Attaching: lock + score + respawn
        assert_eq!(session.phase(), Phase::Spawn);

        // The piece is now part of the board.
        assert!(session.board.occupied(4, 19));
        assert!(session.board.occupied(5, 19));
    }

    #[test]
    fn quadruple_clear_scores_and_persists_the_record() {
        let store = RecordingStore::default();
        let saves = store.saves.clone();
        let mut session = Session::new(5, store);
        start_with(&mut session, PieceKind::O);

        for y in 16..20 {
            fill_row(&mut session.board, y);
        }
        // Park the current piece on top of the stack and let it attach.
        session.handle_input(Some(UserAction::Down));
        session.phase = Phase::Attaching;
        session.handle_input(None);

        assert_eq!(session.score(), 1500);
        assert_eq!(session.high_score(), 1500);
        assert_eq!(saves.borrow().as_slice(), &[1500]);

        // 1500 points put the session on level 3 at 660ms per descent.
        assert_eq!(session.level(), 3);
        assert_eq!(session.speed(), 660);
        assert_eq!(session.phase(), Phase::Spawn);
    }

    #[test]
    fn attach_without_clears_scores_nothing() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);
        session.handle_input(Some(UserAction::Down));
        session.phase = Phase::Attaching;
        session.handle_input(None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), LEVEL_MIN);
    }

    #[test]
    fn game_over_restart_reinitializes_in_place() {
        let mut session = session();
        start_with(&mut session, PieceKind::T);
        session.score = 900;
        fill_row(&mut session.board, 19);
        session.phase = Phase::GameOver;

        session.handle_input(Some(UserAction::Start));
        assert_eq!(session.phase(), Phase::Spawn);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), LEVEL_MIN);
        assert!(!session.board.occupied(0, 19));

        // Play resumes with a fresh spawn.
        session.handle_input(None);
        assert_eq!(session.phase(), Phase::Moving);
    }

    #[test]
    fn snapshot_mirrors_session_state() {
        let mut session = session();
        start_with(&mut session, PieceKind::S);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Moving);
        assert_eq!(snapshot.current, session.current());
        assert_eq!(snapshot.next.kind, session.next_piece().kind);
        assert_eq!(snapshot.score, session.score());
        assert_eq!(snapshot.speed, session.speed());
        assert!(snapshot.playable());
    }
}
