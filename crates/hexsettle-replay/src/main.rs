//! Hexsettle headless replay driver.
//!
//! Starts a match, feeds it a scripted list of inputs and prints the final
//! snapshot as JSON on stdout.

use anyhow::Context;
use hexsettle_core::{Game, GameConfig, SeededRandom};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod script;

const DEFAULT_PLAYERS: &str = "Red,Blue,Orange";

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::var("HEXSETTLE_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path))?;
            GameConfig::from_json(&json)?
        }
        Err(_) => GameConfig::default(),
    };

    let names: Vec<String> = std::env::var("HEXSETTLE_PLAYERS")
        .unwrap_or_else(|_| DEFAULT_PLAYERS.into())
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    anyhow::ensure!(
        (3..=4).contains(&names.len()),
        "HEXSETTLE_PLAYERS must name 3 or 4 players, got {}",
        names.len()
    );

    let inputs = match std::env::var("HEXSETTLE_SCRIPT") {
        Ok(path) => script::load(&path)?,
        Err(_) => Vec::new(),
    };

    info!("Starting replay of {} inputs...", inputs.len());

    let rng = SeededRandom::from_optional_seed(config.seed);
    let mut game = Game::new(names, config, Box::new(rng));
    for (step, input) in inputs.into_iter().enumerate() {
        input.apply(&mut game);
        debug!("#{} {:?} -> {}", step, input, game.phase().name());
    }

    info!("Replay finished in phase {}", game.phase().name());
    info!("{}", game.help_text());

    println!("{}", game.snapshot().to_json()?);
    Ok(())
}
