//! Answer sources that need no network.

use std::collections::VecDeque;

use tracing::debug;

use super::{OracleError, OracleQueryInterface, OracleRequest};

/// A source that is never reachable, so every answer is a canned one.
#[derive(Debug, Clone, Default)]
pub struct OfflineOracle;

impl OracleQueryInterface for OfflineOracle {
    fn ask(&mut self, _request: &OracleRequest) -> Result<String, OracleError> {
        Err(OracleError::Unavailable("offline".to_string()))
    }
}

/// Replays a fixed list of replies in order and records every request.
///
/// Once the script runs out every further question fails as unavailable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    replies: VecDeque<Result<String, OracleError>>,
    asked: Vec<OracleRequest>,
}

impl ScriptedOracle {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn reply(mut self, text: impl Into<String>) -> Self {
        self.replies.push_back(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn fail(mut self, error: OracleError) -> Self {
        self.replies.push_back(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    pub fn asked(&self) -> &[OracleRequest] {
        &self.asked
    }
}

impl OracleQueryInterface for ScriptedOracle {
    fn ask(&mut self, request: &OracleRequest) -> Result<String, OracleError> {
        self.asked.push(request.clone());
        let reply = self
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::Unavailable("script exhausted".to_string())));
        debug!(oracle = %request.oracle, ok = reply.is_ok(), "scripted reply");
        reply
    }
}
