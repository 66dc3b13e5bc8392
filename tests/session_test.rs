//! Tests for the session state machine and manager.

mod common;

use bulls_and_cows::{
    Code, Effect, Event, Feedback, Session, SessionManager, SessionPhase, StrategyTree, score,
};
use common::{all_codes, consistent_tree};
use std::sync::{Arc, OnceLock};

fn shared_tree() -> Arc<StrategyTree> {
    static TREE: OnceLock<Arc<StrategyTree>> = OnceLock::new();
    Arc::clone(TREE.get_or_init(|| Arc::new(consistent_tree())))
}

fn new_session() -> Session {
    Session::with_tree("test".to_string(), shared_tree())
}

/// First emitted text line, for assertions on messages.
fn first_text(effects: &[Effect]) -> &str {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::EmitText(text) => Some(text.as_str()),
            Effect::PresentChoices => None,
        })
        .expect("expected at least one text effect")
}

/// Extracts the code revealed by an "answer is ..." message.
fn revealed_code(text: &str) -> Code {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().expect("message must reveal a valid code")
}

// ─────────────────────────────────────────────────────────────
//  Play mode
// ─────────────────────────────────────────────────────────────

#[test]
fn test_play_round_start_and_invalid_guesses() {
    let mut session = new_session();
    assert_eq!(session.phase(), SessionPhase::Idle);

    let effects = session.handle(Event::StartPlay);
    assert!(first_text(&effects).starts_with("1A2B started"));
    assert_eq!(session.phase(), SessionPhase::PlayAwaitingGuess);

    for bad in ["123", "12345", "1123", "12a4", "hello"] {
        let effects = session.handle(Event::Guess(bad.to_string()));
        assert!(first_text(&effects).starts_with("Invalid input!"), "input {:?}", bad);
        assert_eq!(session.phase(), SessionPhase::PlayAwaitingGuess);
    }
}

#[test]
fn test_play_cancel_reveals_consistent_secret() {
    let mut session = new_session();
    session.handle(Event::StartPlay);

    // Probe the secret once, then cancel and check the reveal is the
    // exact code that produced that feedback.
    let probe: Code = "0123".parse().unwrap();
    let effects = session.handle(Event::Guess(probe.to_string()));
    let Some(reported) = Feedback::from_label(first_text(&effects)) else {
        // One-in-5040 chance the probe was the secret; round already over.
        assert_eq!(session.phase(), SessionPhase::Idle);
        return;
    };

    let effects = session.handle(Event::Cancel);
    let text = first_text(&effects);
    assert!(text.starts_with("The answer is "));
    let secret = revealed_code(text);
    assert_eq!(score(&secret, &probe), reported);
    assert_eq!(session.phase(), SessionPhase::Idle);

    // Cleared session: further guesses have no transition.
    let effects = session.handle(Event::Guess("4567".to_string()));
    assert!(effects.is_empty());
    assert_eq!(session.phase(), SessionPhase::Idle);
}

/// Play mode needs no answers data: a session built without a strategy
/// tree still runs a full round.
#[test]
fn test_play_runs_without_solver_data() {
    let mut session = Session::new("test".to_string());

    let effects = session.handle(Event::StartPlay);
    assert!(first_text(&effects).starts_with("1A2B started"));
    assert_eq!(session.phase(), SessionPhase::PlayAwaitingGuess);

    let effects = session.handle(Event::Guess("0123".to_string()));
    assert!(!effects.is_empty());

    if session.phase() == SessionPhase::PlayAwaitingGuess {
        let effects = session.handle(Event::Cancel);
        assert!(first_text(&effects).starts_with("The answer is "));
    }
    assert_eq!(session.phase(), SessionPhase::Idle);
}

/// Plays a full round to the win by candidate elimination against the
/// engine's hidden secret.
#[test]
fn test_play_round_to_win() {
    let mut session = new_session();
    session.handle(Event::StartPlay);

    let mut candidates = all_codes();
    for _ in 0..12 {
        let guess = candidates[0];
        let effects = session.handle(Event::Guess(guess.to_string()));
        let text = first_text(&effects);

        if let Some(feedback) = Feedback::from_label(text) {
            assert!(!feedback.is_win(), "a winning guess must end the round instead");
            candidates.retain(|c| score(c, &guess) == feedback);
            assert!(!candidates.is_empty(), "engine feedback must stay consistent");
            continue;
        }

        assert!(text.starts_with("Congratulations!"));
        assert_eq!(revealed_code(text), guess);
        assert_eq!(session.phase(), SessionPhase::Idle);
        return;
    }
    panic!("candidate elimination must win within 12 guesses");
}

// ─────────────────────────────────────────────────────────────
//  Solve mode
// ─────────────────────────────────────────────────────────────

#[test]
fn test_solve_clue_validation_and_first_prompt() {
    let mut session = new_session();

    let effects = session.handle(Event::StartSolve);
    assert!(first_text(&effects).starts_with("1A2B solver started"));
    assert_eq!(session.phase(), SessionPhase::SolveAwaitingClue);

    let effects = session.handle(Event::Clue("9999".to_string()));
    assert!(first_text(&effects).starts_with("Invalid input!"));
    assert_eq!(session.phase(), SessionPhase::SolveAwaitingClue);

    let effects = session.handle(Event::Clue("1234".to_string()));
    assert_eq!(
        effects,
        vec![
            Effect::EmitText("Your initial clue is 1234. Please choose the result:".to_string()),
            Effect::PresentChoices,
        ]
    );
    assert_eq!(session.phase(), SessionPhase::SolveAwaitingFeedback);
}

#[test]
fn test_solve_next_guess_after_root_feedback() {
    let mut session = new_session();
    session.handle(Event::StartSolve);
    session.handle(Event::Clue("1234".to_string()));

    let effects = session.handle(Event::FeedbackSelect(Feedback::A0B0));
    assert_eq!(
        effects,
        vec![
            Effect::EmitText("Next guess is 0567. Please choose the result:".to_string()),
            Effect::PresentChoices,
        ]
    );
    assert_eq!(session.phase(), SessionPhase::SolveAwaitingFeedback);
}

#[test]
fn test_solve_inconsistent_feedback_reprompts() {
    let mut session = new_session();
    session.handle(Event::StartSolve);
    session.handle(Event::Clue("1234".to_string()));
    session.handle(Event::FeedbackSelect(Feedback::A0B0));

    // 0A0B again excludes eight of the ten digits: impossible.
    let effects = session.handle(Event::FeedbackSelect(Feedback::A0B0));
    assert_eq!(
        effects,
        vec![
            Effect::EmitText("Invalid input, please try again.".to_string()),
            Effect::PresentChoices,
        ]
    );
    // Session state is intact; a corrected selection continues the run.
    assert_eq!(session.phase(), SessionPhase::SolveAwaitingFeedback);
    let effects = session.handle(Event::FeedbackSelect(Feedback::A2B2));
    assert!(first_text(&effects).starts_with("Next guess is "));
}

#[test]
fn test_solve_full_run_finds_hidden_secret() {
    let secret: Code = "8095".parse().unwrap();
    let clue: Code = "1234".parse().unwrap();

    let mut session = new_session();
    session.handle(Event::StartSolve);
    let effects = session.handle(Event::Clue(clue.to_string()));
    assert!(first_text(&effects).starts_with("Your initial clue is"));

    let mut pending = clue;
    for _ in 0..16 {
        let feedback = score(&secret, &pending);
        let effects = session.handle(Event::FeedbackSelect(feedback));
        let text = first_text(&effects);

        if let Some(rest) = text.strip_prefix("Next guess is ") {
            pending = rest[..4].parse().expect("guess is a valid code");
            continue;
        }

        assert_eq!(text, format!("The answer is {}.", secret));
        assert_eq!(session.phase(), SessionPhase::Idle);
        return;
    }
    panic!("solver must terminate within the tree depth");
}

#[test]
fn test_solve_cancel_clears_session() {
    let mut session = new_session();
    session.handle(Event::StartSolve);
    session.handle(Event::Clue("1234".to_string()));

    let effects = session.handle(Event::Cancel);
    assert_eq!(
        effects,
        vec![Effect::EmitText("1A2B solver canceled.".to_string())]
    );
    assert_eq!(session.phase(), SessionPhase::Idle);
}

// ─────────────────────────────────────────────────────────────
//  Dispatcher-level behavior
// ─────────────────────────────────────────────────────────────

#[test]
fn test_events_without_transition_are_ignored() {
    let mut session = new_session();

    assert!(session.handle(Event::Guess("1234".to_string())).is_empty());
    assert!(session.handle(Event::FeedbackSelect(Feedback::A0B0)).is_empty());
    assert!(session.handle(Event::Cancel).is_empty());
    assert_eq!(session.phase(), SessionPhase::Idle);

    // Mode mismatches are ignored too, without disturbing the round.
    session.handle(Event::StartPlay);
    assert!(session.handle(Event::Clue("1234".to_string())).is_empty());
    assert!(session.handle(Event::StartPlay).is_empty());
    assert_eq!(session.phase(), SessionPhase::PlayAwaitingGuess);
}

#[test]
fn test_treeless_manager_refuses_solve_but_plays() {
    let manager = SessionManager::new();

    assert!(manager.dispatch("alpha", Event::StartSolve).is_empty());
    assert_eq!(manager.phase("alpha"), SessionPhase::Idle);

    manager.dispatch("alpha", Event::StartPlay);
    assert_eq!(manager.phase("alpha"), SessionPhase::PlayAwaitingGuess);
}

#[test]
fn test_manager_keeps_conversations_independent() {
    let manager = SessionManager::with_tree(shared_tree());

    manager.dispatch("alpha", Event::StartPlay);
    assert_eq!(manager.phase("alpha"), SessionPhase::PlayAwaitingGuess);
    assert_eq!(manager.phase("beta"), SessionPhase::Idle);

    manager.dispatch("beta", Event::StartSolve);
    assert_eq!(manager.phase("beta"), SessionPhase::SolveAwaitingClue);

    manager.dispatch("alpha", Event::Cancel);
    assert_eq!(manager.phase("alpha"), SessionPhase::Idle);
    assert_eq!(manager.phase("beta"), SessionPhase::SolveAwaitingClue);
}
