//! How the adversary hunts the player.
//!
//! Aggression escalates with the player's action count. Below
//! [`AGITATED_FROM`] actions the adversary moves every third turn and chases a
//! quarter of the time; up to [`FRENZIED_FROM`] it moves every other turn and
//! chases half the time; after that it moves and chases every turn.
//!
//! A chase picks the legal step that lands closest (Manhattan) to the player.
//! Ties go to the earliest direction in [`Direction::ALL`] order.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::grid::{Direction, GridWorld, Position};

/// First action count at which the adversary is [`Aggression::Agitated`].
pub const AGITATED_FROM: u32 = 30;
/// First action count at which the adversary is [`Aggression::Frenzied`].
pub const FRENZIED_FROM: u32 = 50;

/// Aggression band, derived from the player's action count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggression {
    /// Fewer than 30 actions.
    Calm,
    /// 30 to 49 actions.
    Agitated,
    /// 50 or more actions.
    Frenzied,
}

impl Aggression {
    /// The band for a given action count.
    pub fn for_moves(player_moves: u32) -> Self {
        if player_moves < AGITATED_FROM {
            Self::Calm
        } else if player_moves < FRENZIED_FROM {
            Self::Agitated
        } else {
            Self::Frenzied
        }
    }

    /// Whether the adversary may move on a turn with this action count.
    pub fn allows_move(self, player_moves: u32) -> bool {
        match self {
            Self::Calm => player_moves % 3 == 0,
            Self::Agitated => player_moves % 2 == 0,
            Self::Frenzied => true,
        }
    }

    /// Probability that a permitted move is a chase rather than a wander.
    pub fn chase_probability(self) -> f64 {
        match self {
            Self::Calm => 0.25,
            Self::Agitated => 0.5,
            Self::Frenzied => 1.0,
        }
    }
}

impl std::fmt::Display for Aggression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calm => write!(f, "calm"),
            Self::Agitated => write!(f, "agitated"),
            Self::Frenzied => write!(f, "frenzied"),
        }
    }
}

/// What the adversary does on one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryDecision {
    /// The cadence gate kept it still.
    Gated,
    /// Permitted to move but no legal direction exists.
    Cornered,
    /// Stepped toward the player.
    Chase {
        /// Direction taken.
        direction: Direction,
        /// Room entered.
        to: Position,
    },
    /// Stepped in a random legal direction.
    Wander {
        /// Direction taken.
        direction: Direction,
        /// Room entered.
        to: Position,
    },
}

impl AdversaryDecision {
    /// The room the adversary moves into, if it moves.
    pub fn destination(&self) -> Option<Position> {
        match self {
            Self::Gated | Self::Cornered => None,
            Self::Chase { to, .. } | Self::Wander { to, .. } => Some(*to),
        }
    }
}

/// The escalating pursuit policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PursuitPolicy;

impl PursuitPolicy {
    /// Create the policy.
    pub fn new() -> Self {
        Self
    }

    /// The cadence gate for a given action count.
    pub fn should_move(&self, player_moves: u32) -> bool {
        Aggression::for_moves(player_moves).allows_move(player_moves)
    }

    /// The legal step that lands closest to `player`, first in
    /// [`Direction::ALL`] order on ties.
    pub fn chase_step(&self, adversary: Position, player: Position) -> Option<(Direction, Position)> {
        let mut best: Option<(Direction, Position, u32)> = None;
        for (direction, to) in GridWorld::neighbors(adversary) {
            let distance = to.manhattan_distance(player);
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((direction, to, distance));
            }
        }
        best.map(|(direction, to, _)| (direction, to))
    }

    /// Decide the adversary's move for this turn.
    ///
    /// `player_moves` is the action count including the action being
    /// resolved.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        player_moves: u32,
        adversary: Position,
        player: Position,
        rng: &mut R,
    ) -> AdversaryDecision {
        let aggression = Aggression::for_moves(player_moves);
        if !aggression.allows_move(player_moves) {
            trace!(player_moves, %aggression, "adversary gated");
            return AdversaryDecision::Gated;
        }

        let options = GridWorld::neighbors(adversary);
        if options.is_empty() {
            return AdversaryDecision::Cornered;
        }

        let chase = rng.random::<f64>() < aggression.chase_probability();
        let decision = if chase {
            match self.chase_step(adversary, player) {
                Some((direction, to)) => AdversaryDecision::Chase { direction, to },
                None => AdversaryDecision::Cornered,
            }
        } else {
            match options.choose(rng) {
                Some(&(direction, to)) => AdversaryDecision::Wander { direction, to },
                None => AdversaryDecision::Cornered,
            }
        };
        trace!(player_moves, %aggression, ?decision, "adversary decided");
        decision
    }
}
