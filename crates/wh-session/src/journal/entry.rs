//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wh_core::{Direction, OracleId, Outcome, Position};

/// A single entry in the game journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A new game began.
    GameStarted {
        /// 1-based game number within the session.
        game: u32,
        /// Seed the game was built from.
        seed: u64,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// The player read the rules.
    RulesViewed {
        /// Action count after this action.
        move_number: u32,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// An oracle answered a question.
    OracleQuery {
        /// Action count after this action.
        move_number: u32,
        /// The oracle asked.
        oracle: OracleId,
        /// The question.
        question: String,
        /// The answer shown to the player.
        answer: String,
        /// Whether the canned answer stood in for the answer source.
        fallback: bool,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// The player picked an oracle and then backed out.
    QueryAborted {
        /// Action count after this action.
        move_number: u32,
        /// The oracle that was selected.
        oracle: OracleId,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// The player stepped into a neighbouring room.
    PlayerMoved {
        /// Action count after this action.
        move_number: u32,
        /// Direction taken.
        direction: Direction,
        /// Room left.
        from: Position,
        /// Room entered.
        to: Position,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// The adversary stepped into a neighbouring room.
    AdversaryMoved {
        /// Room left.
        from: Position,
        /// Room entered.
        to: Position,
        /// Whether it was chasing the player.
        chased: bool,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// The game ended.
    GameOver {
        /// Action count at the end.
        move_number: u32,
        /// How it ended.
        outcome: Outcome,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
}
