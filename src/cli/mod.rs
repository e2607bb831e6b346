pub mod categorize;
pub mod demo;
pub mod init;
pub mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "clerk",
    about = "Receipt categorization and tax-deductibility CLI for expense reporting."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up clerk: write a starter rules file to edit.
    Init {
        /// Path for the rules file (default: ~/.config/clerk/rules.json)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Categorize a receipt and print the expense summary.
    Categorize {
        /// Receipt JSON document, or a CSV of line items
        file: PathBuf,
        /// Rules file (default: ~/.config/clerk/rules.json)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Receipt vendor (required for CSV input)
        #[arg(long)]
        vendor: Option<String>,
        /// Receipt date, YYYY-MM-DD (required for CSV input)
        #[arg(long)]
        date: Option<String>,
        /// Receipt currency (CSV input)
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Emit the summary as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Manage categorization rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Categorize a built-in sample hotel folio.
    Demo,
    /// Generate shell completions.
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List the rules in priority order.
    List {
        /// Rules file (default: ~/.config/clerk/rules.json)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Validate the rules file without running anything.
    Check {
        /// Rules file (default: ~/.config/clerk/rules.json)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}
