use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use wh_core::{Direction, OracleId};
use wh_session::{
    Action, Journal, JournalEntry, MenuChoice, OfflineOracle, RoundEngine, SessionConfig, SessionError,
    TurnEvent, TurnReport, is_yes, parse_direction, parse_oracle,
};
use wh_session::input::BACK_SLOT;

use crate::render;

type Engine = RoundEngine<OfflineOracle>;

pub fn run(
    seed: Option<u64>,
    reveal: bool,
    clarify: bool,
    journal: Option<&Path>,
    format: &str,
) -> Result<(), String> {
    if journal.is_some() {
        // Reject a bad format before the player sinks time into a game.
        Journal::new().export(format).map_err(|e| e.to_string())?;
    }

    let mut seed = super::resolve_seed(seed);
    let stdin = io::stdin();
    let mut reader = stdin.lock();

    println!("  {} Whompus", "Starting".bold());
    println!("  Find your way through the dark lab. Trap doors hide in ten rooms,");
    println!("  and the Whompus is hunting you. Type 'q' to leave.");

    let mut session_journal = Journal::new();
    let mut game = 1;
    loop {
        let config = SessionConfig::default()
            .with_seed(seed)
            .with_trap_clarification(clarify);
        let mut engine = RoundEngine::new(config, OfflineOracle);
        let started = Utc::now();

        let finished = play_game(&mut engine, &mut reader, reveal)?;

        session_journal.append(JournalEntry::GameStarted {
            game,
            seed,
            timestamp: started,
        });
        session_journal.extend(engine.journal());
        if !finished {
            break;
        }
        match prompt(&mut reader, "\nPlay again? (y/n): ")? {
            Some(answer) if is_yes(&answer) => {}
            _ => break,
        }
        game += 1;
        seed = seed.wrapping_add(1);
        println!("  {} {seed}", "Seed:".dimmed());
    }

    if let Some(path) = journal {
        save_journal(&session_journal, path, format)?;
    }
    println!("  Thanks for playing.");
    Ok(())
}

/// Play until the game ends (`true`) or the player leaves (`false`).
fn play_game(engine: &mut Engine, reader: &mut impl BufRead, reveal: bool) -> Result<bool, String> {
    loop {
        let snapshot = engine.snapshot();
        println!();
        print!("{}", render::board(&snapshot, reveal));
        println!("  {}", render::status_line(&snapshot, &engine.legal_moves()));
        println!();
        println!(
            "  {}  {}  {}  {}",
            "(M)ove".bold(),
            "(A)sk an AI".bold(),
            "(I)nfo".bold(),
            "(Q)uit".dimmed()
        );

        let Some(input) = prompt(reader, "Enter your choice (M/A/I): ")? else {
            return Ok(false);
        };
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }

        let action = match MenuChoice::parse(&input) {
            Ok(MenuChoice::Info) => Action::ViewRules,
            Ok(MenuChoice::Move) => match read_direction(engine, reader)? {
                Some(direction) => Action::Move(direction),
                None => return Ok(false),
            },
            Ok(MenuChoice::Ask) => {
                show_oracle_menu();
                let Some(input) = prompt(reader, "Enter your choice (1-4 or B): ")? else {
                    return Ok(false);
                };
                let oracle = match parse_oracle(&input) {
                    Ok(Some(oracle)) => oracle,
                    Ok(None) => continue,
                    Err(e) => {
                        warn(&e);
                        continue;
                    }
                };
                show_question_help(oracle);
                Action::Ask {
                    oracle,
                    question: prompt(reader, "> ")?,
                }
            }
            Err(e) => {
                warn(&e);
                continue;
            }
        };

        let report = engine.apply(action).map_err(|e| e.to_string())?;
        show_events(&report, reveal);

        if engine.pending_answer().is_some() {
            prompt(reader, "\nPress Enter to continue...")?;
            engine.acknowledge().map_err(|e| e.to_string())?;
        }

        if let Some(outcome) = report.outcome() {
            println!();
            print!("{}", render::board(&report.snapshot, true));
            println!("\n=== Game Over ===");
            println!("{}", render::outcome_message(outcome).red().bold());
            println!(
                "  You lasted {} moves; the Whompus moved {} times.",
                report.snapshot.player_moves, report.snapshot.adversary_moves
            );
            let roles: Vec<String> = engine
                .state()
                .roles()
                .iter()
                .map(|(oracle, role)| format!("{oracle} was {role}"))
                .collect();
            println!("  {}", roles.join(", "));
            return Ok(true);
        }
    }
}

/// Ask for a direction until a legal one is given. `None` on end of input.
fn read_direction(engine: &Engine, reader: &mut impl BufRead) -> Result<Option<Direction>, String> {
    let legal = engine.legal_moves();
    let from = engine.state().player();
    println!();
    println!("=== Movement ===");
    println!("Valid moves: {}", direction_list(&legal));
    loop {
        let Some(input) = prompt(reader, "Direction (up/down/left/right): ")? else {
            return Ok(None);
        };
        match parse_direction(&input) {
            Ok(direction) if legal.contains(&direction) => return Ok(Some(direction)),
            Ok(direction) => warn(&SessionError::IllegalMove {
                from,
                direction,
                legal: legal.clone(),
            }),
            Err(e) => warn(&e),
        }
    }
}

fn direction_list(directions: &[Direction]) -> String {
    directions
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn show_events(report: &TurnReport, reveal: bool) {
    for event in &report.events {
        match event {
            TurnEvent::RulesShown { text } => {
                println!();
                println!(
                    "  {}",
                    format!("GAME RULES (Moves: {})", report.snapshot.player_moves).bold()
                );
                println!("{text}");
            }
            TurnEvent::OracleAnswered { response, .. } => {
                println!();
                println!("{}", response.as_str().cyan());
            }
            TurnEvent::QueryAborted { oracle } => {
                println!(
                    "  {}",
                    format!("You turn away from {oracle}. The move still counts.").dimmed()
                );
            }
            TurnEvent::PlayerMoved { direction, to, .. } => {
                println!("  You move {direction} to {to}.");
            }
            TurnEvent::AdversaryMoved { to, .. } => {
                if reveal {
                    println!("  The Whompus moves to {to}.");
                } else {
                    println!("  {}", "Something shifts in the dark...".dimmed());
                }
            }
            TurnEvent::GameEnded { .. } => {}
        }
    }
}

fn show_oracle_menu() {
    println!();
    println!("=== SELECT AN AI ===");
    for oracle in OracleId::ALL {
        let blurb = match oracle {
            OracleId::Ali => "One of three AIs that may help or mislead",
            OracleId::An => "Another AI that may tell truth or lies",
            OracleId::Ale => "The third AI, choose questions carefully",
        };
        println!("{}. {:<4} - {blurb}", oracle.slot(), oracle.name());
    }
    println!("{BACK_SLOT}. Back - Return to main menu (B)");
}

fn show_question_help(oracle: OracleId) {
    println!();
    println!("You can ask about nearby rooms, trap doors, the Whompus, or the AI itself.");
    println!("Type 'exit' to return to the game menu.");
    println!("\nYour question for {oracle}:");
}

fn warn(e: &SessionError) {
    println!("  {}", e.to_string().yellow());
}

fn save_journal(journal: &Journal, path: &Path, format: &str) -> Result<(), String> {
    let text = journal.export(format).map_err(|e| e.to_string())?;
    std::fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    println!("  Journal written to {}", path.display());
    Ok(())
}

/// Print `text`, read one line. `None` on end of input.
fn prompt(reader: &mut impl BufRead, text: &str) -> Result<Option<String>, String> {
    print!("{text}");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(e.to_string()),
    }
}
