use clap::{CommandFactory, Parser};

use clerk::cli::{self, Cli, Commands, RulesCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { rules } => cli::init::run(rules.as_deref()),
        Commands::Categorize {
            file,
            rules,
            vendor,
            date,
            currency,
            json,
        } => cli::categorize::run(
            &file,
            rules.as_deref(),
            vendor.as_deref(),
            date.as_deref(),
            &currency,
            json,
        ),
        Commands::Rules { command } => match command {
            RulesCommands::List { rules } => cli::rules::list(rules.as_deref()),
            RulesCommands::Check { rules } => cli::rules::check(rules.as_deref()),
        },
        Commands::Demo => cli::demo::run(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "clerk", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
