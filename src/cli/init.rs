use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::settings::write_starter_rules;

pub fn run(rules_flag: Option<&Path>) -> Result<()> {
    let path = write_starter_rules(rules_flag)?;
    println!("{} starter rules at {}", "Wrote".green().bold(), path.display());
    println!("Edit the file, then try:");
    println!("  clerk rules check");
    println!("  clerk categorize receipt.json");
    Ok(())
}
