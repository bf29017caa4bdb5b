//! Room classification.
//!
//! Status is computed on every call. Trap doors never move but the adversary
//! does, so nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, GridWorld, Position};
use crate::state::GameState;

/// What occupies a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// A trap door.
    Trap,
    /// The adversary is standing here.
    Adversary,
    /// Nothing of note.
    Empty,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trap => write!(f, "trap"),
            Self::Adversary => write!(f, "whompus"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Classify a room. A trap takes precedence over the adversary.
pub fn check_room_status(position: Position, state: &GameState) -> RoomStatus {
    if state.is_trap(position) {
        RoomStatus::Trap
    } else if position == state.adversary() {
        RoomStatus::Adversary
    } else {
        RoomStatus::Empty
    }
}

/// A room next to the player, as reported to the oracles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentRoom {
    /// Direction from the player.
    pub direction: Direction,
    /// The room.
    pub position: Position,
    /// What is in it right now.
    pub status: RoomStatus,
}

/// Every on-grid room next to the player, in direction order.
pub fn adjacent_rooms(state: &GameState) -> Vec<AdjacentRoom> {
    GridWorld::neighbors(state.player())
        .into_iter()
        .map(|(direction, position)| AdjacentRoom {
            direction,
            position,
            status: check_room_status(position, state),
        })
        .collect()
}
