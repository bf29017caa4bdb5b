//! Oracle identities and the once-per-game role draw.
//!
//! Three named oracles answer the player's questions. Each game one of them
//! always tells the truth, one always lies, and one answers at random. The
//! draw is a closed mapping from [`OracleId`] to [`OracleRole`] so a role can
//! never be missing or duplicated.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Inclusive upper bound of the role draw range `[1, ROLE_DRAW_MAX]`.
pub const ROLE_DRAW_MAX: u8 = 10;

/// One of the three named oracles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OracleId {
    /// ALI, menu slot 1.
    Ali,
    /// AN, menu slot 2.
    An,
    /// ALE, menu slot 3.
    Ale,
}

impl OracleId {
    /// All oracles in menu order.
    pub const ALL: [OracleId; 3] = [OracleId::Ali, OracleId::An, OracleId::Ale];

    /// The oracle's display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ali => "ALI",
            Self::An => "AN",
            Self::Ale => "ALE",
        }
    }

    /// Menu slot, 1-based.
    pub fn slot(self) -> usize {
        self.index() + 1
    }

    /// Look up an oracle by 1-based menu slot.
    pub fn from_slot(slot: usize) -> Option<Self> {
        slot.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Parse an oracle from a menu slot (`1`) or name (`ali`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(slot) = s.parse::<usize>() {
            return Self::from_slot(slot);
        }
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
    }

    fn index(self) -> usize {
        match self {
            Self::Ali => 0,
            Self::An => 1,
            Self::Ale => 2,
        }
    }
}

impl std::fmt::Display for OracleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How an oracle treats the truth for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OracleRole {
    /// Always tells the truth.
    Truthful,
    /// Always lies.
    Deceptive,
    /// Tells the truth or lies at random.
    Random,
}

impl std::fmt::Display for OracleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truthful => write!(f, "truthful"),
            Self::Deceptive => write!(f, "deceptive"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// The role held by each oracle for one game.
///
/// Exactly one oracle holds each role. The only constructors are
/// [`RoleAssignment::from_draws`] and [`RoleAssignment::assign`], both of
/// which derive the roles from three distinct draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    roles: [OracleRole; 3],
}

impl RoleAssignment {
    /// Derive roles from one draw per oracle (in [`OracleId::ALL`] order).
    ///
    /// The lowest draw is deceptive, the highest truthful, the middle random.
    pub fn from_draws(draws: [u8; 3]) -> CoreResult<Self> {
        let [a, b, c] = draws;
        if a == b || b == c || a == c {
            return Err(CoreError::DuplicateDraws(draws));
        }
        Ok(Self::ranked(draws))
    }

    /// Draw three distinct values from `[1, ROLE_DRAW_MAX]` and assign roles.
    pub fn assign<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let picks = rand::seq::index::sample(rng, usize::from(ROLE_DRAW_MAX), 3);
        // index::sample yields distinct values below ROLE_DRAW_MAX.
        let draws = [0, 1, 2].map(|i| picks.index(i) as u8 + 1);
        debug!(?draws, "drew oracle roles");
        Self::ranked(draws)
    }

    fn ranked(draws: [u8; 3]) -> Self {
        let min = draws.iter().copied().min().unwrap_or(0);
        let max = draws.iter().copied().max().unwrap_or(0);
        Self {
            roles: draws.map(|d| {
                if d == min {
                    OracleRole::Deceptive
                } else if d == max {
                    OracleRole::Truthful
                } else {
                    OracleRole::Random
                }
            }),
        }
    }

    /// The role held by an oracle.
    pub fn role_of(&self, oracle: OracleId) -> OracleRole {
        self.roles[oracle.index()]
    }

    /// Iterate `(oracle, role)` pairs in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (OracleId, OracleRole)> + '_ {
        OracleId::ALL.into_iter().map(|id| (id, self.role_of(id)))
    }
}
