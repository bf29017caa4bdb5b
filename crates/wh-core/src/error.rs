//! Error types for the core game rules.

use crate::grid::{Direction, Position};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when a requested change would break a game invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The requested step would leave the grid.
    #[error("cannot move {direction} from {from}")]
    OffGrid {
        /// Where the mover stands.
        from: Position,
        /// The rejected direction.
        direction: Direction,
    },

    /// A position outside the grid was supplied.
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    /// The game has already reached a terminal outcome.
    #[error("the game is already over")]
    GameOver,

    /// The player and the adversary were given the same start room.
    #[error("player and adversary cannot both start in {0}")]
    SharedStart(Position),

    /// A trap layout did not have the required shape.
    #[error("invalid trap layout: {0}")]
    InvalidTraps(String),

    /// Oracle draws were not three distinct values.
    #[error("oracle draws must be distinct, got {0:?}")]
    DuplicateDraws([u8; 3]),
}
