//! Command-line interface for the 1A2B engine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 1A2B - four-digit unique-digit deduction game and solver
#[derive(Parser, Debug)]
#[command(name = "1a2b")]
#[command(about = "Play 1A2B against the engine, or let it solve for you", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the precomputed answers file (overrides config)
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a round: the engine picks a secret, you guess
    Play,

    /// Solve a round: you hold the secret, the engine guesses
    Solve,
}
