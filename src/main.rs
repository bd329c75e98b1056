//! Hyperxo - command-line driver
//!
//! Self-play between two opponents, or a one-off move suggestion.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use hyperxo::{Difficulty, GameState, Opponent, OpponentConfig, Player};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Selfplay { x, o, config } => run_selfplay(x, o, config.as_deref()),
        Command::Suggest {
            moves,
            difficulty,
            config,
        } => run_suggest(&moves, difficulty, config.as_deref()),
    }
}

/// Builds an opponent, taking budget and table size from the config file if given.
fn opponent(difficulty: Difficulty, config: Option<&Path>) -> Result<Opponent> {
    let base = match config {
        Some(path) => OpponentConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => OpponentConfig::default(),
    };
    Ok(Opponent::from_config(&base).with_difficulty(difficulty))
}

/// Plays one game between two opponents and prints each position.
#[instrument(skip(config))]
fn run_selfplay(x: Difficulty, o: Difficulty, config: Option<&Path>) -> Result<()> {
    let x_player = opponent(x, config)?;
    let o_player = opponent(o, config)?;
    info!("Starting self-play");

    let mut state = GameState::new();
    while !state.is_terminal() {
        let side = match state.current_player() {
            Player::X => &x_player,
            Player::O => &o_player,
        };
        let mov = side.choose(&state)?;
        state = state.apply_move(mov)?;
        println!("{mov}");
        println!("{state}");
    }

    match state.winner() {
        Some(player) => println!("{player} wins"),
        None => println!("Draw"),
    }
    Ok(())
}

/// Replays `moves` and prints the opponent's analysis as JSON.
#[instrument(skip(config))]
fn run_suggest(moves: &str, difficulty: Difficulty, config: Option<&Path>) -> Result<()> {
    let state = cli::replay_moves(moves)?;
    let result = opponent(difficulty, config)?.analyze(&state)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
