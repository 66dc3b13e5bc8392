//! 1A2B - unified CLI
//!
//! Line-oriented driver for the session state machine: it feeds events
//! in and renders effects on stdout. The engine itself lives in the
//! library; this binary is only the transport.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use bulls_and_cows::{
    Effect, EngineConfig, Event, Feedback, SessionManager, SessionPhase, StrategyTree,
};
use clap::Parser;
use cli::{Cli, Command};
use std::io::BufRead;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Conversation key for the single local session this binary drives.
const CONVERSATION: &str = "local";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        // Play mode picks its own secret; no answers data is involved.
        Command::Play => {
            let manager = SessionManager::new();
            run(&manager, Event::StartPlay)
        }
        // Missing or malformed answers data aborts startup; no solver
        // session can be served without it.
        Command::Solve => {
            let config = match &cli.config {
                Some(path) => EngineConfig::from_file(path)?,
                None => EngineConfig::default(),
            };
            let answers_path = cli
                .answers
                .clone()
                .unwrap_or_else(|| config.answers_path().clone());

            let tree = StrategyTree::load(&answers_path).with_context(|| {
                format!("loading answers data from {}", answers_path.display())
            })?;
            info!(path = %answers_path.display(), "Engine ready");

            let manager = SessionManager::with_tree(Arc::new(tree));
            run(&manager, Event::StartSolve)
        }
    }
}

/// Drives one round to completion over stdin/stdout.
fn run(manager: &SessionManager, start: Event) -> Result<()> {
    render(&manager.dispatch(CONVERSATION, start));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let event = if text == "/cancel" {
            Event::Cancel
        } else {
            match manager.phase(CONVERSATION) {
                SessionPhase::PlayAwaitingGuess => Event::Guess(text.to_string()),
                SessionPhase::SolveAwaitingClue => Event::Clue(text.to_string()),
                SessionPhase::SolveAwaitingFeedback => match Feedback::from_label(text) {
                    Some(feedback) => Event::FeedbackSelect(feedback),
                    None => {
                        // Unknown label: the menu is a closed set, so this
                        // never reaches the state machine.
                        println!("Invalid input, please try again.");
                        continue;
                    }
                },
                SessionPhase::Idle => break,
            }
        };

        render(&manager.dispatch(CONVERSATION, event));
        if manager.phase(CONVERSATION) == SessionPhase::Idle {
            break;
        }
    }

    Ok(())
}

/// Renders effects as stdout lines; choices as the five-row menu.
fn render(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::EmitText(text) => println!("{}", text),
            Effect::PresentChoices => {
                for row in Feedback::keyboard_rows() {
                    let labels: Vec<&str> = row.iter().map(|fb| fb.label()).collect();
                    println!("  [{}]", labels.join("] ["));
                }
            }
        }
    }
}
