//! Command-line front end for Whompus.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "whompus",
    about = "Whompus: escape the dark lab before the Whompus finds you",
    version,
    propagate_version = true
)]
struct Cli {
    /// RNG seed for a reproducible game (random if omitted)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play {
        /// Show the Whompus on the board
        #[arg(long)]
        reveal: bool,

        /// Don't append trap statements to answers that dodge trap questions
        #[arg(long)]
        no_clarify: bool,

        /// Write the game journal to this file when the session ends
        #[arg(short, long)]
        journal: Option<PathBuf>,

        /// Journal format: markdown, text, json
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },

    /// Play many games with a random-walk player and summarize the results
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Give up on a game after this many moves
        #[arg(short, long, default_value = "200")]
        max_turns: u32,

        /// Print one line per game
        #[arg(short, long)]
        verbose: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the rules
    Rules,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            reveal,
            no_clarify,
            journal,
            format,
        } => commands::play::run(
            cli.seed,
            reveal,
            !no_clarify,
            journal.as_deref(),
            &format,
        ),
        Commands::Simulate {
            games,
            max_turns,
            verbose,
            json,
        } => commands::simulate::run(cli.seed, games, max_turns, verbose, json),
        Commands::Rules => commands::rules::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
