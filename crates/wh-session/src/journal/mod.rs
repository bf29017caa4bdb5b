//! Turn-by-turn record of a game.

pub mod entry;
pub mod log;

pub use entry::JournalEntry;
pub use log::Journal;
