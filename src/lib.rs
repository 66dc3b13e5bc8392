//! Rules engine and solver for 1A2B, the four-digit unique-digit
//! Bulls and Cows variant.
//!
//! # Architecture
//!
//! - **Game**: codes, the 14-value feedback set, scoring, and the
//!   canonical digit mapping
//! - **Solver**: the precomputed strategy tree (loaded once, shared
//!   read-only) and the traversal engine
//! - **Session**: the per-conversation state machine and the manager
//!   that serializes events per conversation
//! - **Config**: TOML configuration for the binary
//!
//! # Example
//!
//! ```
//! use bulls_and_cows::{Code, score};
//!
//! let secret: Code = "1234".parse()?;
//! let guess: Code = "1243".parse()?;
//! assert_eq!(score(&secret, &guess).counts(), (2, 2));
//! # Ok::<(), bulls_and_cows::ParseCodeError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod game;
mod session;
mod solver;

// Crate-level exports - Game types
pub use game::{CanonicalMapping, Code, FEEDBACK_COUNT, Feedback, ParseCodeError, score};

// Crate-level exports - Solver
pub use solver::{Solver, SolverStep, StrategyNode, StrategyTree, TreeError};

// Crate-level exports - Session management
pub use session::{
    ConversationId, Effect, Event, Session, SessionManager, SessionPhase, SessionState,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};
