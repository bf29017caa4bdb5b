//! Error types for the turn engine.

use wh_core::{CoreError, Direction, Position};

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors returned by the turn engine.
///
/// Every variant except [`SessionError::Core`] is an input problem: the
/// engine leaves the game untouched and the caller should prompt again.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The requested direction leaves the grid.
    #[error("cannot move {direction} from {from}; valid moves: {}", format_directions(.legal))]
    IllegalMove {
        /// The player's room.
        from: Position,
        /// The rejected direction.
        direction: Direction,
        /// Directions that would have been accepted.
        legal: Vec<Direction>,
    },

    /// An oracle answer must be acknowledged before the next action.
    #[error("acknowledge the oracle's answer first")]
    AwaitingAcknowledgment,

    /// There is no answer waiting for acknowledgment.
    #[error("nothing to acknowledge")]
    NothingToAcknowledge,

    /// The game has ended.
    #[error("the game is over")]
    GameOver,

    /// Input did not name an action.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Input did not name a direction.
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    /// Input did not name an oracle.
    #[error("unknown oracle: {0} (choose 1-3 or ALI, AN, ALE)")]
    UnknownOracle(String),

    /// Invalid export format.
    #[error("unknown format '{0}', use: markdown, text, json")]
    UnknownFormat(String),

    /// Journal serialization failed.
    #[error("failed to serialize journal: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A core rule was violated.
    #[error("{0}")]
    Core(#[from] CoreError),
}

fn format_directions(dirs: &[Direction]) -> String {
    dirs.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
