//! Turn engine for Whompus.
//!
//! Wraps the core rules in a [`RoundEngine`] that resolves one player action
//! at a time, consults the oracles through an [`OracleQueryInterface`], and
//! keeps a [`Journal`] of the game.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod journal;
pub mod oracle;
pub mod rules;

pub use config::SessionConfig;
pub use engine::{Action, RoundEngine, TurnEvent, TurnPhase, TurnReport, is_abort};
pub use error::{SessionError, SessionResult};
pub use input::{MenuChoice, is_yes, parse_direction, parse_oracle};
pub use journal::{Journal, JournalEntry};
pub use oracle::{OfflineOracle, OracleError, OracleQueryInterface, OracleRequest, ScriptedOracle};
pub use rules::RULES;
