//! Core rules for Whompus, a hidden-information pursuit game.
//!
//! The player crosses a 10×10 grid of dark rooms. Ten of them hide trap
//! doors, and a roaming adversary (the Whompus) hunts the player with growing
//! aggression. This crate holds the pure rules: grid geometry, the game state
//! aggregate, oracle role assignment, and the adversary's movement policy.
//! Turn orchestration lives in `wh-session`.

/// Adversary aggression bands and the pursuit policy.
pub mod adversary;
/// Error types used throughout the crate.
pub mod error;
/// Grid geometry: positions, directions, and bounds.
pub mod grid;
/// Oracle identities and role assignment.
pub mod roles;
/// Room classification.
pub mod room;
/// The mutable game aggregate and its snapshot.
pub mod state;

/// Re-export adversary policy types.
pub use adversary::{AdversaryDecision, Aggression, PursuitPolicy};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export grid types.
pub use grid::{Direction, GRID_SIZE, GridWorld, Position};
/// Re-export oracle role types.
pub use roles::{OracleId, OracleRole, RoleAssignment};
/// Re-export room classification.
pub use room::{AdjacentRoom, RoomStatus, adjacent_rooms, check_room_status};
/// Re-export game state types.
pub use state::{
    ADVERSARY_START, GameSnapshot, GameState, GameStatus, Outcome, PLAYER_START, TRAP_COUNT,
};
