//! Four-player knockout tournament in the terminal.
//!
//! Spawns a bracket actor with a simulated match runner and plays the
//! presentation surface: announcements and results are printed, and Enter
//! acknowledges or advances.

mod config;
mod logging;
mod terminal;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use config::{ArenaConfig, ArenaOverrides};
use ctrlc::set_handler;
use knockout::bracket::{
    BracketActor, BracketHandle, BracketManager, BracketMessage, ChannelPresentation, Entrant,
    PresentationRequest,
};
use knockout::sim::SimulatedMatchRunner;
use log::info;
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Run a four-player single-elimination tournament

USAGE:
  knockout [OPTIONS]

OPTIONS:
  --players      A,B,C,D     Comma-separated player names  [default: env KNOCKOUT_PLAYERS]
  --score-limit  N           Points needed to win a match  [default: env KNOCKOUT_SCORE_LIMIT or 5]
  --setup        FILE        JSON bracket setup (entrants and match_config)
  --seed         N           Seed for reproducible matches [default: env KNOCKOUT_SEED]

FLAGS:
  --power-ups                Enable power-ups
  --auto                     Advance without waiting for Enter
  --json                     Print the final bracket as JSON
  -h, --help                 Print help information

ENVIRONMENT:
  KNOCKOUT_RALLY_DELAY_MS    Simulated time per rally in milliseconds [default: 150]
  RUST_LOG                   Log filter (logs go to stderr)
  (A .env file in the working directory is loaded if present)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = ArenaOverrides {
        players: pargs.opt_value_from_str("--players")?,
        score_limit: pargs.opt_value_from_str("--score-limit")?,
        power_ups: pargs.contains("--power-ups"),
        setup: pargs
            .opt_value_from_str::<_, String>("--setup")?
            .map(PathBuf::from),
        auto_advance: pargs.contains("--auto"),
        seed: pargs.opt_value_from_str("--seed")?,
        json: pargs.contains("--json"),
    };

    let unused = pargs.finish();
    if !unused.is_empty() {
        anyhow::bail!("Unexpected arguments: {unused:?}\n\n{HELP}");
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ArenaConfig::load(overrides)?;
    config.validate()?;
    info!(
        "Starting tournament: {} (first to {})",
        config.players.join(", "),
        config.match_config.score_limit
    );

    let (handle, inbox) = BracketHandle::mailbox();
    let runner = match config.seed {
        Some(seed) => SimulatedMatchRunner::seeded(handle.clone(), seed),
        None => SimulatedMatchRunner::new(handle.clone()),
    }
    .with_rally_delay(config.rally_delay);
    let (presentation, mut requests) = ChannelPresentation::channel();

    let actor = BracketActor::new(BracketManager::new(runner, presentation), inbox);
    let actor = tokio::spawn(actor.run());

    let started_at = Instant::now();
    let entrants: Vec<Entrant> = config.players.iter().map(Entrant::new).collect();
    handle
        .start(entrants, config.match_config)
        .await
        .context("Failed to start the bracket")?;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    while let Some(request) = requests.recv().await {
        println!("{}", terminal::render(&request));

        if matches!(request, PresentationRequest::Champion { .. }) {
            break;
        }

        let Some((prompt, event)) = terminal::reply(&request) else {
            continue;
        };

        if config.auto_advance {
            tokio::time::sleep(Duration::from_millis(300)).await;
        } else {
            println!("{prompt}");
            if stdin.next_line().await?.is_none() {
                info!("Input closed, stopping tournament");
                handle.shutdown().await?;
                break;
            }
        }

        handle.send(BracketMessage::Event(event)).await?;
    }

    let snapshot = actor.await.context("Bracket actor panicked")?;

    if let Some(champion) = snapshot.champion() {
        logging::log_bracket_finished(
            &champion.name,
            snapshot.history.len(),
            started_at.elapsed().as_millis() as u64,
        );
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
