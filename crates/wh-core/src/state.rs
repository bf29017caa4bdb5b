//! The mutable game aggregate and its read-only snapshot.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::grid::{Direction, GRID_SIZE, GridWorld, Position};
use crate::roles::RoleAssignment;

/// Where the player starts: bottom-left room.
pub const PLAYER_START: Position = Position::new(9, 0);
/// Where the adversary starts: top-right room.
pub const ADVERSARY_START: Position = Position::new(0, 9);
/// Number of trap doors hidden on the board.
pub const TRAP_COUNT: usize = 10;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player walked onto a trap door.
    Trapped,
    /// The adversary and the player shared a room.
    Caught,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trapped => write!(f, "trapped"),
            Self::Caught => write!(f, "caught"),
        }
    }
}

/// Whether the game is still running.
///
/// `game_over` and `outcome` are one value so they can only change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues.
    InProgress,
    /// A terminal condition fired. Irreversible.
    Over(Outcome),
}

/// Entity positions, trap doors, counters, oracle roles, and terminal status
/// for one game.
///
/// Trap doors and roles are fixed at construction. All later changes go
/// through the mutators below, each of which refuses to run once the game is
/// over.
#[derive(Debug, Clone)]
pub struct GameState {
    player: Position,
    adversary: Position,
    traps: BTreeSet<Position>,
    player_moves: u32,
    adversary_moves: u32,
    roles: RoleAssignment,
    status: GameStatus,
}

impl GameState {
    /// Start a fresh game: standard start cells, random traps, random roles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let traps = place_traps(rng, &[PLAYER_START, ADVERSARY_START]);
        let roles = RoleAssignment::assign(rng);
        debug!(traps = traps.len(), "new game state");
        Self {
            player: PLAYER_START,
            adversary: ADVERSARY_START,
            traps,
            player_moves: 0,
            adversary_moves: 0,
            roles,
            status: GameStatus::InProgress,
        }
    }

    /// Build a game from an explicit layout.
    ///
    /// Fails unless both start cells are on the grid and distinct, and `traps`
    /// holds exactly [`TRAP_COUNT`] distinct on-grid rooms, none of them a
    /// start cell.
    pub fn with_layout(
        player: Position,
        adversary: Position,
        traps: impl IntoIterator<Item = Position>,
        roles: RoleAssignment,
    ) -> CoreResult<Self> {
        for p in [player, adversary] {
            if !GridWorld::contains(p) {
                return Err(CoreError::OutOfBounds(p));
            }
        }
        if player == adversary {
            return Err(CoreError::SharedStart(player));
        }
        let traps: BTreeSet<Position> = traps.into_iter().collect();
        if traps.len() != TRAP_COUNT {
            return Err(CoreError::InvalidTraps(format!(
                "expected {TRAP_COUNT} distinct trap doors, got {}",
                traps.len()
            )));
        }
        if let Some(p) = traps.iter().find(|p| !GridWorld::contains(**p)) {
            return Err(CoreError::OutOfBounds(*p));
        }
        if traps.contains(&player) || traps.contains(&adversary) {
            return Err(CoreError::InvalidTraps(
                "trap door on a start cell".to_string(),
            ));
        }
        Ok(Self {
            player,
            adversary,
            traps,
            player_moves: 0,
            adversary_moves: 0,
            roles,
            status: GameStatus::InProgress,
        })
    }

    /// The player's room.
    pub fn player(&self) -> Position {
        self.player
    }

    /// The adversary's room.
    pub fn adversary(&self) -> Position {
        self.adversary
    }

    /// The trap doors, in row-major order.
    pub fn traps(&self) -> &BTreeSet<Position> {
        &self.traps
    }

    /// Whether a room hides a trap door.
    pub fn is_trap(&self, position: Position) -> bool {
        self.traps.contains(&position)
    }

    /// Actions the player has taken so far.
    pub fn player_moves(&self) -> u32 {
        self.player_moves
    }

    /// Steps the adversary has taken so far.
    pub fn adversary_moves(&self) -> u32 {
        self.adversary_moves
    }

    /// The oracle roles for this game.
    pub fn roles(&self) -> &RoleAssignment {
        &self.roles
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether a terminal outcome has fired.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    /// The terminal outcome, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Over(outcome) => Some(outcome),
        }
    }

    /// Count one player action. Returns the new total.
    pub fn record_action(&mut self) -> CoreResult<u32> {
        self.ensure_running()?;
        self.player_moves += 1;
        Ok(self.player_moves)
    }

    /// Step the player one room. Does not touch the action counter.
    pub fn move_player(&mut self, direction: Direction) -> CoreResult<Position> {
        self.ensure_running()?;
        let next = GridWorld::step(self.player, direction).ok_or(CoreError::OffGrid {
            from: self.player,
            direction,
        })?;
        self.player = next;
        Ok(next)
    }

    /// Put the adversary in a new room and count the step.
    pub fn move_adversary(&mut self, to: Position) -> CoreResult<()> {
        self.ensure_running()?;
        if !GridWorld::contains(to) {
            return Err(CoreError::OutOfBounds(to));
        }
        self.adversary = to;
        self.adversary_moves += 1;
        Ok(())
    }

    /// End the game. Fails if it already ended.
    pub fn finish(&mut self, outcome: Outcome) -> CoreResult<()> {
        self.ensure_running()?;
        self.status = GameStatus::Over(outcome);
        Ok(())
    }

    /// A read-only copy of everything a renderer needs.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.player,
            adversary: self.adversary,
            revealed_traps: if self.is_over() {
                self.traps.iter().copied().collect()
            } else {
                Vec::new()
            },
            player_moves: self.player_moves,
            adversary_moves: self.adversary_moves,
            game_over: self.is_over(),
            outcome: self.outcome(),
        }
    }

    fn ensure_running(&self) -> CoreResult<()> {
        if self.is_over() {
            Err(CoreError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Read-only view of a [`GameState`] for redrawing the board.
///
/// Trap doors stay hidden until the game ends; then all of them are listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The player's room.
    pub player: Position,
    /// The adversary's room.
    pub adversary: Position,
    /// Trap doors the renderer may draw.
    pub revealed_traps: Vec<Position>,
    /// Player action counter.
    pub player_moves: u32,
    /// Adversary step counter.
    pub adversary_moves: u32,
    /// Whether the game has ended.
    pub game_over: bool,
    /// How it ended, if it has.
    pub outcome: Option<Outcome>,
}

/// Draw [`TRAP_COUNT`] distinct rooms, skipping the `excluded` cells.
pub fn place_traps<R: Rng + ?Sized>(rng: &mut R, excluded: &[Position]) -> BTreeSet<Position> {
    let mut traps = BTreeSet::new();
    while traps.len() < TRAP_COUNT {
        let p = Position::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
        if !excluded.contains(&p) {
            traps.insert(p);
        }
    }
    traps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roles() -> RoleAssignment {
        RoleAssignment::from_draws([1, 5, 10]).unwrap()
    }

    fn row_traps(row: u8) -> Vec<Position> {
        (0..10).map(|c| Position::new(row, c)).collect()
    }

    #[test]
    fn new_game_invariants() {
        for seed in 0..200 {
            let s = GameState::new(&mut StdRng::seed_from_u64(seed));
            assert_eq!(s.traps().len(), TRAP_COUNT);
            assert!(!s.is_trap(PLAYER_START));
            assert!(!s.is_trap(ADVERSARY_START));
            assert_eq!(s.player(), PLAYER_START);
            assert_eq!(s.adversary(), ADVERSARY_START);
            assert_eq!(s.player_moves(), 0);
            assert_eq!(s.status(), GameStatus::InProgress);
        }
    }

    #[test]
    fn layout_validation() {
        assert!(GameState::with_layout(PLAYER_START, ADVERSARY_START, row_traps(4), roles()).is_ok());

        let err = GameState::with_layout(PLAYER_START, ADVERSARY_START, row_traps(4).into_iter().take(9), roles())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTraps(_)));

        let err = GameState::with_layout(PLAYER_START, ADVERSARY_START, row_traps(9), roles()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTraps(_)));

        let err = GameState::with_layout(Position::new(10, 0), ADVERSARY_START, row_traps(4), roles())
            .unwrap_err();
        assert_eq!(err, CoreError::OutOfBounds(Position::new(10, 0)));
    }

    #[test]
    fn layout_rejects_shared_start_room() {
        let start = Position::new(5, 5);
        let err = GameState::with_layout(start, start, row_traps(4), roles()).unwrap_err();
        assert_eq!(err, CoreError::SharedStart(start));
    }

    #[test]
    fn move_player_rejects_off_grid() {
        let mut s = GameState::with_layout(PLAYER_START, ADVERSARY_START, row_traps(4), roles()).unwrap();
        let err = s.move_player(Direction::Left).unwrap_err();
        assert!(matches!(err, CoreError::OffGrid { .. }));
        assert_eq!(s.player(), PLAYER_START);
        assert_eq!(s.move_player(Direction::Up).unwrap(), Position::new(8, 0));
    }

    #[test]
    fn finish_is_irreversible() {
        let mut s = GameState::with_layout(PLAYER_START, ADVERSARY_START, row_traps(4), roles()).unwrap();
        s.finish(Outcome::Caught).unwrap();
        assert!(s.is_over());
        assert_eq!(s.outcome(), Some(Outcome::Caught));
        assert_eq!(s.finish(Outcome::Trapped), Err(CoreError::GameOver));
        assert_eq!(s.record_action(), Err(CoreError::GameOver));
        assert_eq!(s.outcome(), Some(Outcome::Caught));
    }

    #[test]
    fn snapshot_hides_traps_until_over() {
        let mut s = GameState::with_layout(PLAYER_START, ADVERSARY_START, row_traps(4), roles()).unwrap();
        s.record_action().unwrap();
        s.move_adversary(Position::new(1, 9)).unwrap();
        let snap = s.snapshot();
        assert!(snap.revealed_traps.is_empty());
        assert_eq!(snap.player_moves, 1);
        assert_eq!(snap.adversary_moves, 1);
        assert!(!snap.game_over);

        s.finish(Outcome::Trapped).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.revealed_traps.len(), TRAP_COUNT);
        assert_eq!(snap.outcome, Some(Outcome::Trapped));
    }

    #[test]
    fn snapshot_serializes() {
        let s = GameState::new(&mut StdRng::seed_from_u64(3));
        let json = serde_json::to_string(&s.snapshot()).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s.snapshot());
    }
}
