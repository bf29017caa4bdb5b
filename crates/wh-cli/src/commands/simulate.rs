use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::debug;

use wh_core::Outcome;
use wh_session::{Action, OfflineOracle, RoundEngine, SessionConfig, SessionResult};

/// How one headless game went.
#[derive(Debug, Serialize)]
struct GameResult {
    game: u32,
    seed: u64,
    outcome: Option<Outcome>,
    moves: u32,
    adversary_moves: u32,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    games: u32,
    max_turns: u32,
    trapped: u32,
    caught: u32,
    survived: u32,
    average_moves: f64,
    results: Vec<GameResult>,
}

pub fn run(
    seed: Option<u64>,
    games: u32,
    max_turns: u32,
    verbose: bool,
    json: bool,
) -> Result<(), String> {
    if games == 0 {
        return Err("--games must be at least 1".into());
    }
    // JSON output stays machine-readable, so the seed goes into the summary instead.
    let seed = if json {
        seed.unwrap_or_else(rand::random)
    } else {
        super::resolve_seed(seed)
    };

    let mut walker = StdRng::seed_from_u64(seed);
    let mut results = Vec::with_capacity(games as usize);
    for game in 0..games {
        let game_seed = seed.wrapping_add(u64::from(game));
        let mut engine = RoundEngine::new(SessionConfig::default().with_seed(game_seed), OfflineOracle);
        let outcome = random_walk(&mut engine, &mut walker, max_turns).map_err(|e| e.to_string())?;
        let state = engine.state();
        debug!(game, ?outcome, moves = state.player_moves(), "simulated game");
        results.push(GameResult {
            game: game + 1,
            seed: game_seed,
            outcome,
            moves: state.player_moves(),
            adversary_moves: state.adversary_moves(),
        });
    }

    let summary = summarize(seed, max_turns, results);
    if json {
        let out = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }
    print_summary(&summary, verbose);
    Ok(())
}

/// Wander at random until the game ends or `max_turns` moves are spent.
fn random_walk(
    engine: &mut RoundEngine<OfflineOracle>,
    rng: &mut StdRng,
    max_turns: u32,
) -> SessionResult<Option<Outcome>> {
    while engine.state().player_moves() < max_turns {
        let legal = engine.legal_moves();
        let Some(&direction) = legal.choose(rng) else {
            break;
        };
        let report = engine.apply(Action::Move(direction))?;
        if let Some(outcome) = report.outcome() {
            return Ok(Some(outcome));
        }
    }
    Ok(None)
}

fn summarize(seed: u64, max_turns: u32, results: Vec<GameResult>) -> Summary {
    let count = |o: Option<Outcome>| results.iter().filter(|r| r.outcome == o).count() as u32;
    let trapped = count(Some(Outcome::Trapped));
    let caught = count(Some(Outcome::Caught));
    let survived = count(None);
    let total: u64 = results.iter().map(|r| u64::from(r.moves)).sum();
    let average_moves = total as f64 / results.len().max(1) as f64;
    Summary {
        seed,
        games: results.len() as u32,
        max_turns,
        trapped,
        caught,
        survived,
        average_moves,
        results,
    }
}

fn print_summary(summary: &Summary, verbose: bool) {
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({} games, max {} moves, seed={})",
            summary.games, summary.max_turns, summary.seed
        )
        .dimmed()
    );
    println!();

    if verbose {
        println!("  {}", "Games".bold().underline());
        println!();
        for r in &summary.results {
            let label = format!("[game {:>3}]", r.game).dimmed();
            let outcome = match r.outcome {
                Some(Outcome::Trapped) => "trapped".yellow(),
                Some(Outcome::Caught) => "caught".red(),
                None => "survived".green(),
            };
            println!(
                "  {label} {outcome} after {} moves (Whompus moved {}, seed {})",
                r.moves, r.adversary_moves, r.seed
            );
        }
        println!();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Outcome", "Games", "Share"]);
    for (label, n) in [
        ("Trapped", summary.trapped),
        ("Caught", summary.caught),
        ("Survived", summary.survived),
    ] {
        let share = f64::from(n) * 100.0 / f64::from(summary.games.max(1));
        table.add_row(vec![label.to_string(), n.to_string(), format!("{share:.1}%")]);
    }
    println!("{table}");
    println!();
    println!("  Average moves per game: {:.1}", summary.average_moves);
}
