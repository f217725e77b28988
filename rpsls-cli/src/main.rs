mod session;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use rpsls_game::constants::DEFAULT_CONFIG_PATH;
use rpsls_game::{CatalogSource, JsonFile, RandomOpponent};

#[derive(Debug, Parser)]
#[command(name = "rpsls", version)]
#[command(about = "Play one round of rock-paper-scissors-lizard-spock against the computer")]
struct Args {
    /// Choice configuration (JSON with a `choices` array)
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed the computer's picks for a reproducible round
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let source = JsonFile::new(args.config.clone());
    let catalog = source
        .load_catalog()
        .with_context(|| format!("loading choices from {}", source.path().display()))?;
    log::info!(
        "loaded {} choices from {}",
        catalog.len(),
        source.path().display()
    );
    for issue in catalog.balance_issues() {
        log::warn!("unbalanced choice configuration: {issue}");
    }

    let input = stdin().lock();
    let output = stdout().lock();
    let outcome = match args.seed {
        Some(seed) => {
            log::debug!("seeding opponent with {seed}");
            session::play_round(&catalog, RandomOpponent::seeded(seed), input, output)?
        }
        None => session::play_round(&catalog, RandomOpponent::from_entropy(), input, output)?,
    };
    log::info!("round finished: {outcome:?}");
    Ok(())
}
