//! Canned answers used when the answer source fails or dodges a trap
//! question.
//!
//! What is claimed depends on the oracle's role; how it is phrased depends
//! on which oracle is speaking.

use rand::Rng;

use wh_core::{OracleId, OracleRole, Position};

use super::{OracleRequest, mentions_traps};

/// Whether a claim about the adjacent rooms is honest or inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Honest,
    Inverted,
}

impl Claim {
    /// Random oracles flip a fair coin per answer.
    fn for_role<R: Rng + ?Sized>(role: OracleRole, rng: &mut R) -> Self {
        match role {
            OracleRole::Truthful => Self::Honest,
            OracleRole::Deceptive => Self::Inverted,
            OracleRole::Random => {
                if rng.random_bool(0.5) {
                    Self::Honest
                } else {
                    Self::Inverted
                }
            }
        }
    }
}

fn room_list(traps: &[Position]) -> String {
    traps
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(traps: &[Position]) -> &'static str {
    if traps.len() > 1 { "s" } else { "" }
}

fn honest_statement(traps: &[Position]) -> String {
    match traps.len() {
        0 => "There are no traps in the rooms adjacent to you.".to_string(),
        1 => format!("There is a trap in room {}.", room_list(traps)),
        _ => format!("There are traps in rooms {}.", room_list(traps)),
    }
}

fn inverted_statement(traps: &[Position]) -> String {
    if traps.is_empty() {
        "Danger lurks in the rooms around you.".to_string()
    } else {
        format!("Safety waits in room{} {}.", plural(traps), room_list(traps))
    }
}

/// The answer given when the answer source is unavailable.
///
/// Never empty. A truthful oracle names the real adjacent trap doors, a
/// deceptive one inverts them, and a random one does either.
pub fn fallback_answer<R: Rng + ?Sized>(request: &OracleRequest, rng: &mut R) -> String {
    let traps = request.adjacent_traps();
    let statement = match Claim::for_role(request.role, rng) {
        Claim::Honest => honest_statement(&traps),
        Claim::Inverted => inverted_statement(&traps),
    };
    match request.oracle {
        OracleId::Ali => format!(
            "*adjusts mysterious robes* The ancient stones speak clearly to me. {statement} \
             *gestures ominously* Tread carefully, for the dungeon hungers..."
        ),
        OracleId::An => format!(
            "*chuckles mysteriously* The winds of fate whisper to me... {statement} \
             *eyes gleam* But can you trust the wind?"
        ),
        OracleId::Ale => format!(
            "*eyes gleam in the dim light* The shadows reveal to me... {statement} \
             *gestures dramatically* But perhaps the shadows deceive even me..."
        ),
    }
}

/// Append a trap statement to an answer that dodged a trap question.
///
/// Returns the answer unchanged unless the question mentions traps and the
/// answer does not.
pub fn clarify_trap_answer(request: &OracleRequest, answer: &str) -> String {
    if !request.asks_about_traps() || mentions_traps(answer) {
        return answer.to_string();
    }
    let traps = request.adjacent_traps();
    let addendum = match request.role {
        OracleRole::Truthful => format!(
            "*adjusts robes* I must be clear: {}",
            honest_statement(&traps).to_lowercase()
        ),
        OracleRole::Random => {
            if traps.is_empty() {
                "*chuckles* The winds whisper of no traps nearby... but can you trust the wind?"
                    .to_string()
            } else {
                format!(
                    "*chuckles* The winds tell me of trap{} in room{} {}... or do they?",
                    plural(&traps),
                    plural(&traps),
                    room_list(&traps)
                )
            }
        }
        OracleRole::Deceptive => {
            if traps.is_empty() {
                "*eyes gleam* I sense danger in the rooms around you... or do I?".to_string()
            } else {
                format!(
                    "*eyes gleam* I sense safety in room{} {}... or do I?",
                    plural(&traps),
                    room_list(&traps)
                )
            }
        }
    };
    format!("{answer}\n\n{addendum}")
}
