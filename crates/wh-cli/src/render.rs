//! Board drawing. Everything here reads snapshots and nothing else.

use colored::Colorize;

use wh_core::{Direction, GRID_SIZE, GameSnapshot, Outcome, Position};

/// Draw the grid. The Whompus shows only when `reveal` is set or the game
/// is over.
pub fn board(snapshot: &GameSnapshot, reveal: bool) -> String {
    let show_adversary = reveal || snapshot.game_over;
    let mut out = String::from("    ");
    for col in 0..GRID_SIZE {
        out.push_str(&format!("{col} "));
    }
    out.push('\n');

    for row in 0..GRID_SIZE {
        out.push_str(&format!("  {row} "));
        for col in 0..GRID_SIZE {
            let room = Position::new(row, col);
            let cell = if room == snapshot.player {
                match snapshot.outcome {
                    Some(Outcome::Trapped) => "X".red().bold(),
                    Some(Outcome::Caught) => "W".red().bold(),
                    None => "@".green().bold(),
                }
            } else if show_adversary && room == snapshot.adversary {
                "W".red().bold()
            } else if snapshot.revealed_traps.contains(&room) {
                "X".yellow()
            } else {
                ".".dimmed()
            };
            out.push_str(&format!("{cell} "));
        }
        out.push('\n');
    }
    out
}

/// What the player is told when the game ends.
pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Trapped => "You fell into a trap!",
        Outcome::Caught => "The Whompus caught you!",
    }
}

/// One-line status under the board.
pub fn status_line(snapshot: &GameSnapshot, legal: &[Direction]) -> String {
    let moves: Vec<String> = legal.iter().map(|d| d.to_string()).collect();
    format!(
        "Moves: {} | Position: {} | Valid moves: {}",
        snapshot.player_moves,
        snapshot.player,
        moves.join(", ")
    )
}
