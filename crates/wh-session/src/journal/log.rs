//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;
use crate::error::{SessionError, SessionResult};

/// A chronological log of game events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Append every entry of another journal, oldest first.
    pub fn extend(&mut self, other: &Journal) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export in a named format: `markdown`/`md`, `text`/`txt`, or `json`.
    pub fn export(&self, format: &str) -> SessionResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.export_markdown()),
            "text" | "txt" => Ok(self.export_text()),
            "json" => Ok(serde_json::to_string_pretty(self)?),
            other => Err(SessionError::UnknownFormat(other.to_string())),
        }
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Whompus Game Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::GameStarted { game, seed, .. } => {
                    out.push_str(&format!("## Game {game} (seed {seed})\n\n"));
                }
                JournalEntry::RulesViewed { move_number, .. } => {
                    out.push_str(&format!("**Move {move_number}**: read the rules\n\n"));
                }
                JournalEntry::OracleQuery {
                    move_number,
                    oracle,
                    question,
                    answer,
                    fallback,
                    ..
                } => {
                    out.push_str(&format!("**Move {move_number}** asked **{oracle}**: {question}\n"));
                    let marker = if *fallback { " *(offline)*" } else { "" };
                    out.push_str(&format!("  **Answer**{marker}: {answer}\n\n"));
                }
                JournalEntry::QueryAborted {
                    move_number,
                    oracle,
                    ..
                } => {
                    out.push_str(&format!(
                        "**Move {move_number}**: called on {oracle}, then said nothing\n\n"
                    ));
                }
                JournalEntry::PlayerMoved {
                    move_number,
                    direction,
                    from,
                    to,
                    ..
                } => {
                    out.push_str(&format!(
                        "**Move {move_number}**: {direction} from {from} to {to}\n\n"
                    ));
                }
                JournalEntry::AdversaryMoved {
                    from, to, chased, ..
                } => {
                    let how = if *chased { "hunts" } else { "wanders" };
                    out.push_str(&format!("*The Whompus {how}* from {from} to {to}\n\n"));
                }
                JournalEntry::GameOver {
                    move_number,
                    outcome,
                    ..
                } => {
                    out.push_str(&format!("## Game over after {move_number} moves: {outcome}\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Whompus Game Journal\n====================\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::GameStarted { game, seed, .. } => {
                    out.push_str(&format!("--- Game {game} (seed {seed}) ---\n"));
                }
                JournalEntry::RulesViewed { move_number, .. } => {
                    out.push_str(&format!("[{move_number}] Rules\n"));
                }
                JournalEntry::OracleQuery {
                    move_number,
                    oracle,
                    question,
                    answer,
                    fallback,
                    ..
                } => {
                    out.push_str(&format!("[{move_number}] Ask {oracle}: {question}\n"));
                    let marker = if *fallback { " (offline)" } else { "" };
                    out.push_str(&format!("      Answer{marker}: {answer}\n"));
                }
                JournalEntry::QueryAborted {
                    move_number,
                    oracle,
                    ..
                } => {
                    out.push_str(&format!("[{move_number}] Ask {oracle}: (aborted)\n"));
                }
                JournalEntry::PlayerMoved {
                    move_number,
                    direction,
                    from,
                    to,
                    ..
                } => {
                    out.push_str(&format!("[{move_number}] Move {direction}: {from} -> {to}\n"));
                }
                JournalEntry::AdversaryMoved {
                    from, to, chased, ..
                } => {
                    let how = if *chased { "chase" } else { "wander" };
                    out.push_str(&format!("      Whompus {how}: {from} -> {to}\n"));
                }
                JournalEntry::GameOver {
                    move_number,
                    outcome,
                    ..
                } => {
                    out.push_str(&format!("[{move_number}] GAME OVER: {outcome}\n"));
                }
            }
        }
        out
    }
}
