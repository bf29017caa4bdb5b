//! Configuration for a game session.

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible trap layouts, roles, and adversary moves.
    pub seed: u64,
    /// Append a role-consistent trap statement when an oracle sidesteps a
    /// question about traps.
    pub clarify_trap_answers: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            clarify_trap_answers: true,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable trap-answer clarification.
    pub fn with_trap_clarification(mut self, enabled: bool) -> Self {
        self.clarify_trap_answers = enabled;
        self
    }
}
