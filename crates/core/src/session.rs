//! Game session - state machine, drop cadence and lock sequencing
//!
//! # States
//!
//! | From | Allowed targets |
//! |------|-----------------|
//! | MainMenu | Instructions, Controls, Running |
//! | Instructions | Controls, MainMenu |
//! | Controls | Instructions, MainMenu |
//! | Running | Running (restart) |
//! | GameOver | Running, MainMenu |
//!
//! `GameOver` is only ever entered by the engine itself.
//!
//! # Drop step
//!
//! Each step moves the current piece down one row. When it cannot move:
//!
//! 1. its cells are released into the playfield,
//! 2. the queued piece moves from the preview grid into the main grid,
//!    four rows above it and centred,
//! 3. a fresh piece is queued in the preview grid,
//! 4. full rows are resolved, one point each,
//! 5. a locked cell on row 0 ends the game.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, Session};
//! use blockfall_types::{Command, SessionState};
//!
//! let mut session = Session::new(EngineConfig::default(), 12345).unwrap();
//! assert!(session.go_to(SessionState::Running));
//!
//! session.apply(Command::MoveRight);
//! session.apply(Command::HardDrop);
//! assert_eq!(session.pieces_locked(), 1);
//! ```

use rand::Rng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::factory::{GameRng, PieceFactory};
use crate::piece::Piece;
use crate::playfield::Playfield;
use crate::snapshot::{CellSnapshot, LockEvent, PieceSnapshot, SessionSnapshot};
use crate::types::{Command, SessionState, PIECE_BOX_SIZE, PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fell,
    Locked,
    Idle,
}

#[derive(Debug, Clone)]
pub struct Session<R = GameRng> {
    config: EngineConfig,
    state: SessionState,
    paused: bool,
    score: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    pieces_locked: u32,
    playfield: Playfield,
    preview: Playfield,
    current: Option<Piece>,
    next: Option<Piece>,
    factory: PieceFactory<R>,
    last_event: Option<LockEvent>,
}

impl Session<GameRng> {
    /// Create a session on the main menu with a seeded random source
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_factory(config, PieceFactory::seeded(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session on the main menu drawing pieces from `factory`
    pub fn with_factory(config: EngineConfig, factory: PieceFactory<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SessionState::MainMenu,
            paused: false,
            score: 0,
            drop_interval_ms: config.drop_interval_ms,
            drop_timer_ms: 0,
            pieces_locked: 0,
            playfield: Playfield::new(config.columns, config.rows)?,
            preview: Playfield::new(PIECE_BOX_SIZE, PIECE_BOX_SIZE)?,
            current: None,
            next: None,
            factory,
            last_event: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Pieces locked since the game started
    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Direct access to the stack, for tests and scripted setups only.
    ///
    /// Bypasses every gameplay rule, including the one-cell-per-square
    /// check that [`Playfield::lock_cells`] only asserts in debug builds.
    #[doc(hidden)]
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    /// The 4x4 grid holding the queued piece
    pub fn preview(&self) -> &Playfield {
        &self.preview
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Swap in a different falling piece, returning the old one.
    /// For tests and scripted setups only.
    #[doc(hidden)]
    pub fn replace_current(&mut self, mut piece: Piece) -> Option<Piece> {
        piece.change_grid(&self.playfield);
        self.current.replace(piece)
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Running and not paused
    pub fn is_live(&self) -> bool {
        self.state == SessionState::Running && !self.paused
    }

    /// Request a screen change. Returns false for transitions outside the table.
    ///
    /// Requesting `Running` starts a fresh game, also when already running.
    pub fn go_to(&mut self, target: SessionState) -> bool {
        use SessionState::*;

        let allowed = matches!(
            (self.state, target),
            (MainMenu, Instructions | Controls | Running)
                | (Instructions, Controls | MainMenu)
                | (Controls, Instructions | MainMenu)
                | (Running, Running)
                | (GameOver, Running | MainMenu)
        );
        if !allowed {
            debug!(from = ?self.state, to = ?target, "transition refused");
            return false;
        }

        if target == Running {
            self.start_game();
        } else {
            self.enter(target);
        }
        true
    }

    fn enter(&mut self, target: SessionState) {
        debug!(from = ?self.state, to = ?target, "session transition");
        self.state = target;
    }

    fn start_game(&mut self) {
        self.playfield.remove_all_cells();
        self.preview.remove_all_cells();
        self.score = 0;
        self.paused = false;
        self.drop_interval_ms = self.config.drop_interval_ms;
        self.drop_timer_ms = 0;
        self.pieces_locked = 0;
        self.last_event = None;

        self.next = Some(self.factory.spawn(&self.preview, None));
        self.current = Some(self.factory.spawn(&self.playfield, None));

        self.enter(SessionState::Running);
        info!(
            columns = self.config.columns,
            rows = self.config.rows,
            drop_interval_ms = self.drop_interval_ms,
            "game started"
        );
    }

    /// Pause a running game; returns false if nothing changed
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running || self.paused {
            return false;
        }
        self.paused = true;
        debug!("paused");
        true
    }

    /// Resume a paused game; returns false if nothing changed
    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Running || !self.paused {
            return false;
        }
        self.paused = false;
        debug!("resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Change gravity mid-game (difficulty scaling)
    pub fn set_drop_interval_ms(&mut self, interval_ms: u32) -> Result<(), ConfigError> {
        if interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        self.drop_interval_ms = interval_ms;
        Ok(())
    }

    /// Advance the drop cadence by `elapsed_ms`.
    ///
    /// Returns true if a drop step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_live() {
            return false;
        }
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;
        self.drop_step() != Step::Idle
    }

    /// Run one drop step now, regardless of the cadence.
    ///
    /// Returns true if the step ran; check [`Session::last_event`] to see
    /// whether it locked the piece.
    pub fn drop_tick(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.drop_step() != Step::Idle
    }

    /// Apply a player command. Ignored unless running and unpaused.
    ///
    /// The falling piece is pulled back inside the grid afterwards.
    pub fn apply(&mut self, command: Command) -> bool {
        if !self.is_live() {
            return false;
        }

        let accepted = match command {
            Command::MoveLeft => self.with_current(|piece, field| piece.move_left(field)),
            Command::MoveRight => self.with_current(|piece, field| piece.move_right(field)),
            Command::Rotate => self.with_current(|piece, field| piece.rotate(field)),
            Command::MoveToColumn(column) => {
                self.with_current(|piece, field| piece.move_to_column(column, field))
            }
            Command::SoftDrop => self.drop_step() != Step::Idle,
            Command::HardDrop => {
                let mut step = self.drop_step();
                while step == Step::Fell {
                    step = self.drop_step();
                }
                step == Step::Locked
            }
        };

        if let Some(piece) = self.current.as_mut() {
            piece.stay_within_bounds();
        }
        accepted
    }

    fn with_current<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Piece, &Playfield) -> bool,
    {
        match self.current.as_mut() {
            Some(piece) => f(piece, &self.playfield),
            None => false,
        }
    }

    fn drop_step(&mut self) -> Step {
        let Some(piece) = self.current.as_mut() else {
            return Step::Idle;
        };
        if piece.move_down(&self.playfield) {
            return Step::Fell;
        }
        self.lock_current();
        Step::Locked
    }

    fn lock_current(&mut self) {
        if let Some(piece) = self.current.take() {
            self.playfield.lock_cells(piece.release_cells());
            self.pieces_locked += 1;
        }

        self.promote_next();
        self.preview.remove_all_cells();
        self.next = Some(self.factory.spawn(&self.preview, None));

        let cleared = self.playfield.resolve_lines();
        self.score += cleared.len() as u32;
        let game_over = self.playfield.is_topped_out();

        debug!(
            rows = ?cleared,
            score = self.score,
            pieces = self.pieces_locked,
            "piece locked"
        );

        self.last_event = Some(LockEvent {
            rows_cleared: cleared.len() as u32,
            cleared_rows: cleared.iter().copied().take(PIECE_CELLS).collect(),
            score: self.score,
            game_over,
        });

        if game_over {
            self.enter(SessionState::GameOver);
            info!(score = self.score, pieces = self.pieces_locked, "game over");
        }
    }

    /// Move the queued piece into the main grid, above the visible rows and centred
    fn promote_next(&mut self) {
        let Some(mut piece) = self.next.take() else {
            return;
        };
        piece.change_grid(&self.playfield);
        for _ in 0..PIECE_BOX_SIZE {
            piece.move_up();
        }
        let centre = (self.playfield.columns() - PIECE_BOX_SIZE) / 2;
        for _ in 0..centre {
            piece.move_right(&self.playfield);
        }
        self.current = Some(piece);
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.state = self.state;
        out.paused = self.paused;
        out.score = self.score;
        out.columns = self.playfield.columns();
        out.rows = self.playfield.rows();
        out.drop_interval_ms = self.drop_interval_ms;
        out.pieces_locked = self.pieces_locked;
        out.locked.clear();
        out.locked
            .extend(self.playfield.cells().iter().map(CellSnapshot::from));
        out.active = self.current.as_ref().map(PieceSnapshot::from);
        out.next = self.next.as_ref().map(PieceSnapshot::from);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::types::{Color, ShapeKind};

    fn running(seed: u64) -> Session {
        let mut session = Session::new(EngineConfig::default(), seed).unwrap();
        assert!(session.go_to(SessionState::Running));
        session
    }

    #[test]
    fn test_new_session_waits_on_menu() {
        let session = Session::new(EngineConfig::default(), 1).unwrap();
        assert_eq!(session.state(), SessionState::MainMenu);
        assert!(session.current().is_none());
        assert!(session.next().is_none());
    }

    #[test]
    fn test_start_spawns_both_pieces() {
        let session = running(1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.drop_interval_ms(), 500);
        assert_eq!(session.current().unwrap().bounds(), session.playfield().bounds());
        assert_eq!(session.next().unwrap().bounds(), session.preview().bounds());
    }

    #[test]
    fn test_promoted_piece_starts_above_grid_and_centred() {
        let mut session = running(5);
        let queued = *session.next().unwrap();

        let mut piece = Piece::spawn(ShapeKind::O, Color::Red, session.playfield());
        // Sitting on the floor: the next step locks it.
        for _ in 0..14 {
            assert!(piece.move_down(session.playfield()));
        }
        session.replace_current(piece);
        assert!(session.drop_tick());

        let promoted = session.current().unwrap();
        for (before, after) in queued.cells().iter().zip(promoted.cells()) {
            assert_eq!(after.column, before.column + 3);
            assert_eq!(after.row, before.row - 4);
        }
        assert_eq!(session.pieces_locked(), 1);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut session = running(9);
        let row = session.current().unwrap().pivot().row;
        assert!(!session.tick(499));
        assert_eq!(session.current().unwrap().pivot().row, row);
        assert!(session.tick(1));
        assert_eq!(session.current().unwrap().pivot().row, row + 1);
    }

    #[test]
    fn test_hard_drop_locks_exactly_once() {
        let mut session = running(3);
        assert!(session.apply(Command::HardDrop));
        assert_eq!(session.pieces_locked(), 1);
        let event = session.take_last_event().unwrap();
        assert_eq!(event.rows_cleared, 0);
        assert!(!event.game_over);
        assert!(session.take_last_event().is_none());
    }

    #[test]
    fn test_lock_with_full_row_below_terminal() {
        let mut session = running(4);
        session
            .playfield_mut()
            .lock_cells((0..9).map(|c| Cell::locked(c, 15, Color::Gray)));

        let mut piece = Piece::spawn(ShapeKind::I, Color::Cyan, session.playfield());
        assert!(piece.move_to_column(9, session.playfield()));
        session.replace_current(piece);
        assert!(session.apply(Command::HardDrop));

        assert_eq!(session.score(), 1);
        let event = session.last_event().unwrap();
        assert_eq!(event.cleared_rows.as_slice(), &[15]);
        // Three cells of the I remain, shifted down by one.
        assert_eq!(session.playfield().cells().len(), 3);
        assert!(session.playfield().is_occupied(9, 15));
        assert!(!session.playfield().is_occupied(9, 11));
    }
}
