use colored::Colorize;

use wh_session::RULES;

pub fn run() -> Result<(), String> {
    println!("  {}", "Whompus Game Rules".bold().underline());
    println!();
    println!("{RULES}");
    Ok(())
}
