//! The boundary to whatever writes the oracles' answers.
//!
//! The engine hands an [`OracleRequest`] to an [`OracleQueryInterface`] and
//! gets text back, or an [`OracleError`]. On error the engine substitutes a
//! canned answer from [`fallback`] that is consistent with the oracle's role,
//! so a broken collaborator never reaches the player.

pub mod fallback;
pub mod source;

use serde::{Deserialize, Serialize};

use wh_core::{AdjacentRoom, OracleId, OracleRole, Position, RoomStatus};

pub use fallback::{clarify_trap_answer, fallback_answer};
pub use source::{OfflineOracle, ScriptedOracle};

/// Words that count as an answer about traps.
const TRAP_WORDS: [&str; 6] = ["trap", "pit", "hole", "danger", "safe", "clear"];

/// Everything an oracle is told when asked a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// Which oracle is being asked.
    pub oracle: OracleId,
    /// The role it holds this game.
    pub role: OracleRole,
    /// The player's room.
    pub player: Position,
    /// Every room next to the player and what is in it.
    pub adjacent: Vec<AdjacentRoom>,
    /// The player's question, verbatim.
    pub question: String,
}

impl OracleRequest {
    /// Adjacent rooms that hide a trap door.
    pub fn adjacent_traps(&self) -> Vec<Position> {
        self.adjacent
            .iter()
            .filter(|r| r.status == RoomStatus::Trap)
            .map(|r| r.position)
            .collect()
    }

    /// Whether the question is about traps.
    pub fn asks_about_traps(&self) -> bool {
        self.question.to_lowercase().contains("trap")
    }
}

/// Whether an answer says anything about traps at all.
pub fn mentions_traps(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    TRAP_WORDS.iter().any(|w| lower.contains(w))
}

/// Heading shown above every surfaced answer.
pub fn format_response(oracle: OracleId, response: &str) -> String {
    format!("=== {oracle}'s Response ===\n{response}")
}

/// Why the answer source could not answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The service could not be reached or refused the request.
    #[error("oracle service unavailable: {0}")]
    Unavailable(String),

    /// The service did not answer in time.
    #[error("oracle service timed out")]
    Timeout,

    /// The service answered with nothing.
    #[error("oracle returned an empty answer")]
    EmptyAnswer,
}

/// Something that can write an oracle's answer.
pub trait OracleQueryInterface {
    /// Answer one question.
    fn ask(&mut self, request: &OracleRequest) -> Result<String, OracleError>;
}

impl<O: OracleQueryInterface + ?Sized> OracleQueryInterface for Box<O> {
    fn ask(&mut self, request: &OracleRequest) -> Result<String, OracleError> {
        (**self).ask(request)
    }
}
