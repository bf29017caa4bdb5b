pub mod play;
pub mod rules;
pub mod simulate;

use colored::Colorize;

/// Use the given seed, or draw one and tell the player so the game can be replayed.
fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            println!("  {} {seed}", "Seed:".dimmed());
            seed
        }
    }
}
