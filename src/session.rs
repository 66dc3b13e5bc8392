//! Per-conversation session state machine and session management.
//!
//! A session owns the mutable round state (secret, or solver run) and
//! reacts to one inbound event at a time, returning the effects the
//! transport should render. All mutation funnels through the pure
//! `transition` function; the manager is the single-writer boundary
//! that serializes events per conversation.

use crate::game::{Code, Feedback, score};
use crate::solver::{Solver, SolverStep, StrategyTree};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a conversation.
pub type ConversationId = String;

/// An inbound event for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a play round (the engine picks a secret).
    StartPlay,
    /// Start a solver run.
    StartSolve,
    /// Guess text from the player.
    Guess(String),
    /// Initial clue text for the solver.
    Clue(String),
    /// One of the 14 feedback choices, reported by the human.
    FeedbackSelect(Feedback),
    /// Abandon the current round.
    Cancel,
}

/// An outbound effect for the transport to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a line of text.
    EmitText(String),
    /// Present the 14 feedback choices (see `Feedback::keyboard_rows`).
    PresentChoices,
}

/// The mode a session is in, with the state that mode owns.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// No round in progress.
    Idle,
    /// Play mode: the engine holds a secret and awaits guesses.
    PlayAwaitingGuess {
        /// The secret to be guessed; cleared when the round ends.
        secret: Code,
    },
    /// Solve mode: awaiting the user's initial clue.
    SolveAwaitingClue,
    /// Solve mode: a run is underway, awaiting reported feedback.
    SolveAwaitingFeedback {
        /// The active solver run (mapping plus tree cursor).
        solver: Solver,
    },
}

/// Discriminant of `SessionState`, for transports that need to know what
/// input to collect next without touching the owned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No round in progress.
    Idle,
    /// Awaiting a guess in play mode.
    PlayAwaitingGuess,
    /// Awaiting the initial clue in solve mode.
    SolveAwaitingClue,
    /// Awaiting a feedback choice in solve mode.
    SolveAwaitingFeedback,
}

/// A single conversation's session.
///
/// The strategy tree is optional: play mode needs no data, so a
/// transport that only plays may run without one. Solve events reaching
/// a treeless session are ignored like any other dispatcher contract
/// violation.
#[derive(Debug, Clone)]
pub struct Session {
    id: ConversationId,
    state: SessionState,
    tree: Option<Arc<StrategyTree>>,
}

impl Session {
    /// Creates an idle session without solver data (play mode only).
    #[instrument]
    pub fn new(id: ConversationId) -> Self {
        info!(session_id = %id, "Creating new session");
        Self {
            id,
            state: SessionState::Idle,
            tree: None,
        }
    }

    /// Creates an idle session sharing the given strategy tree.
    #[instrument(skip(tree))]
    pub fn with_tree(id: ConversationId, tree: Arc<StrategyTree>) -> Self {
        info!(session_id = %id, "Creating new session with solver data");
        Self {
            id,
            state: SessionState::Idle,
            tree: Some(tree),
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        match &self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::PlayAwaitingGuess { .. } => SessionPhase::PlayAwaitingGuess,
            SessionState::SolveAwaitingClue => SessionPhase::SolveAwaitingClue,
            SessionState::SolveAwaitingFeedback { .. } => SessionPhase::SolveAwaitingFeedback,
        }
    }

    /// Handles one inbound event, returning the effects to render.
    ///
    /// Events are processed one at a time; the caller must not deliver a
    /// second event while one is in flight.
    #[instrument(skip(self), fields(session_id = %self.id, phase = ?self.phase()))]
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        let (next, effects) = transition(state, event, &self.tree);
        self.state = next;
        effects
    }
}

/// Pure state-transition function: consumes the current state and one
/// event, yields the next state and the effects to render.
fn transition(
    state: SessionState,
    event: Event,
    tree: &Option<Arc<StrategyTree>>,
) -> (SessionState, Vec<Effect>) {
    match (state, event) {
        (SessionState::Idle, Event::StartPlay) => {
            let secret = Code::random();
            debug!("Play round started");
            (
                SessionState::PlayAwaitingGuess { secret },
                vec![Effect::EmitText(
                    "1A2B started. Type your guess, or use /cancel to exit:".to_string(),
                )],
            )
        }

        (SessionState::Idle, Event::StartSolve) => {
            if tree.is_none() {
                warn!("Solve requested but no strategy tree is loaded");
                return (SessionState::Idle, vec![]);
            }
            (
                SessionState::SolveAwaitingClue,
                vec![Effect::EmitText(
                    "1A2B solver started, please input an initial clue, or use /cancel to exit:"
                        .to_string(),
                )],
            )
        }

        (SessionState::PlayAwaitingGuess { secret }, Event::Guess(text)) => {
            match text.parse::<Code>() {
                Ok(guess) => {
                    let feedback = score(&secret, &guess);
                    if feedback.is_win() {
                        info!("Round won");
                        (
                            SessionState::Idle,
                            vec![Effect::EmitText(format!(
                                "Congratulations! The answer is {}!",
                                secret
                            ))],
                        )
                    } else {
                        (
                            SessionState::PlayAwaitingGuess { secret },
                            vec![Effect::EmitText(feedback.to_string())],
                        )
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Rejected guess");
                    (
                        SessionState::PlayAwaitingGuess { secret },
                        vec![Effect::EmitText(
                            "Invalid input! Your guess must be four unique digits. \
                             Use /cancel to exit:"
                                .to_string(),
                        )],
                    )
                }
            }
        }

        (SessionState::PlayAwaitingGuess { secret }, Event::Cancel) => {
            info!("Play round canceled");
            (
                SessionState::Idle,
                vec![Effect::EmitText(format!(
                    "The answer is {}. Better luck next time!",
                    secret
                ))],
            )
        }

        (SessionState::SolveAwaitingClue, Event::Clue(text)) => {
            // StartSolve refuses to enter this state without a tree.
            let Some(tree) = tree else {
                warn!("Clue received but no strategy tree is loaded");
                return (SessionState::Idle, vec![]);
            };
            match text.parse::<Code>() {
                Ok(clue) => {
                    let solver = Solver::new(Arc::clone(tree), &clue);
                    (
                        SessionState::SolveAwaitingFeedback { solver },
                        vec![
                            Effect::EmitText(format!(
                                "Your initial clue is {}. Please choose the result:",
                                clue
                            )),
                            Effect::PresentChoices,
                        ],
                    )
                }
                Err(e) => {
                    debug!(error = %e, "Rejected clue");
                    (
                        SessionState::SolveAwaitingClue,
                        vec![Effect::EmitText(
                            "Invalid input! Your clue must be four unique digits. \
                             Use /cancel to exit:"
                                .to_string(),
                        )],
                    )
                }
            }
        }

        (SessionState::SolveAwaitingClue, Event::Cancel) => (
            SessionState::Idle,
            vec![Effect::EmitText("1A2B solver canceled.".to_string())],
        ),

        (SessionState::SolveAwaitingFeedback { mut solver }, Event::FeedbackSelect(feedback)) => {
            match solver.advance(feedback) {
                SolverStep::Solved(answer) => {
                    info!(%answer, "Solver finished");
                    (
                        SessionState::Idle,
                        vec![Effect::EmitText(format!("The answer is {}.", answer))],
                    )
                }
                SolverStep::Inconsistent => (
                    SessionState::SolveAwaitingFeedback { solver },
                    vec![
                        Effect::EmitText("Invalid input, please try again.".to_string()),
                        Effect::PresentChoices,
                    ],
                ),
                SolverStep::Guess(guess) => (
                    SessionState::SolveAwaitingFeedback { solver },
                    vec![
                        Effect::EmitText(format!(
                            "Next guess is {}. Please choose the result:",
                            guess
                        )),
                        Effect::PresentChoices,
                    ],
                ),
            }
        }

        (SessionState::SolveAwaitingFeedback { .. }, Event::Cancel) => (
            SessionState::Idle,
            vec![Effect::EmitText("1A2B solver canceled.".to_string())],
        ),

        // No transition defined: a dispatcher-level contract violation,
        // not a core error. Keep the state, emit nothing.
        (state, event) => {
            warn!(?event, "Event has no transition in current state");
            (state, vec![])
        }
    }
}

/// Owns all sessions and serializes event delivery per conversation.
#[derive(Debug, Clone)]
pub struct SessionManager {
    tree: Option<Arc<StrategyTree>>,
    sessions: Arc<Mutex<HashMap<ConversationId, Session>>>,
}

impl SessionManager {
    /// Creates a manager without solver data; its sessions can only play.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            tree: None,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a manager whose sessions share the given strategy tree.
    #[instrument(skip(tree))]
    pub fn with_tree(tree: Arc<StrategyTree>) -> Self {
        info!("Creating session manager with solver data");
        Self {
            tree: Some(tree),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Delivers one event to a conversation's session, creating the
    /// session on first contact.
    ///
    /// The manager lock is held across the whole transition, so events
    /// for the same conversation are handled strictly one at a time.
    #[instrument(skip(self))]
    pub fn dispatch(&self, conversation: &str, event: Event) -> Vec<Effect> {
        let mut sessions = self.sessions.lock().expect("session lock poisoned");
        let session = sessions
            .entry(conversation.to_string())
            .or_insert_with(|| match &self.tree {
                Some(tree) => Session::with_tree(conversation.to_string(), Arc::clone(tree)),
                None => Session::new(conversation.to_string()),
            });
        session.handle(event)
    }

    /// Returns the phase of a conversation's session, `Idle` if none
    /// exists yet.
    pub fn phase(&self, conversation: &str) -> SessionPhase {
        let sessions = self.sessions.lock().expect("session lock poisoned");
        sessions
            .get(conversation)
            .map(Session::phase)
            .unwrap_or(SessionPhase::Idle)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
