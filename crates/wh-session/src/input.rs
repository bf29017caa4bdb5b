//! Parsing of the player's typed choices.
//!
//! Play is a short dialogue: pick an action from the menu, then supply a
//! direction or an oracle. Each step has its own parser so the front end
//! can re-prompt on exactly the step that failed.

use wh_core::{Direction, OracleId};

use crate::error::{SessionError, SessionResult};

/// A choice from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Move to an adjacent room.
    Move,
    /// Ask an AI assistant.
    Ask,
    /// Show the game information.
    Info,
}

impl MenuChoice {
    /// Parse a menu letter or word.
    pub fn parse(input: &str) -> SessionResult<Self> {
        match input.trim().to_lowercase().as_str() {
            "m" | "move" => Ok(Self::Move),
            "a" | "ask" => Ok(Self::Ask),
            "i" | "info" | "rules" | "help" => Ok(Self::Info),
            other => Err(SessionError::UnknownAction(other.to_string())),
        }
    }
}

/// Parse a direction.
pub fn parse_direction(input: &str) -> SessionResult<Direction> {
    Direction::parse(input).ok_or_else(|| SessionError::UnknownDirection(input.trim().to_string()))
}

/// Menu slot that backs out of the oracle menu.
pub const BACK_SLOT: &str = "4";

/// Parse an oracle pick. `Ok(None)` means the player went back, which
/// costs nothing because no oracle was selected.
pub fn parse_oracle(input: &str) -> SessionResult<Option<OracleId>> {
    let choice = input.trim();
    if choice == BACK_SLOT || choice.eq_ignore_ascii_case("b") || choice.eq_ignore_ascii_case("back") {
        return Ok(None);
    }
    OracleId::parse(choice)
        .map(Some)
        .ok_or_else(|| SessionError::UnknownOracle(choice.to_string()))
}

/// Whether a yes/no answer is yes.
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
