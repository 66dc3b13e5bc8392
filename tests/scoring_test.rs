//! Tests for the scoring algorithm.

mod common;

use bulls_and_cows::{Code, FEEDBACK_COUNT, Feedback, score};
use common::all_codes;
use strum::IntoEnumIterator;

#[test]
fn test_known_scores() {
    let secret: Code = "1234".parse().unwrap();

    let guess: Code = "5678".parse().unwrap();
    assert_eq!(score(&secret, &guess), Feedback::A0B0);

    let guess: Code = "1243".parse().unwrap();
    assert_eq!(score(&secret, &guess), Feedback::A2B2);

    let guess: Code = "1234".parse().unwrap();
    assert_eq!(score(&secret, &guess), Feedback::A4B0);
    assert!(score(&secret, &guess).is_win());
}

#[test]
fn test_self_score_is_win() {
    for code in all_codes() {
        assert_eq!(score(&code, &code), Feedback::A4B0);
    }
}

#[test]
fn test_partial_matches() {
    let secret: Code = "1234".parse().unwrap();

    // One exact, one displaced.
    let guess: Code = "1325".parse().unwrap();
    assert_eq!(score(&secret, &guess).counts(), (1, 2));

    // All four displaced.
    let guess: Code = "4321".parse().unwrap();
    assert_eq!(score(&secret, &guess), Feedback::A0B4);

    // Three exact: the fourth can never be a B.
    let guess: Code = "1235".parse().unwrap();
    assert_eq!(score(&secret, &guess), Feedback::A3B0);
}

/// Exhaustive over the full 5040 x 5040 pairing: 4A iff equal, and both
/// components are symmetric under swapping secret and guess.
#[test]
fn test_exhaustive_pairing_properties() {
    let codes = all_codes();
    assert_eq!(codes.len(), 5040);

    for (i, s) in codes.iter().enumerate() {
        for g in &codes[i..] {
            let forward = score(s, g);
            let backward = score(g, s);
            assert_eq!(forward, backward, "score must be symmetric: {} vs {}", s, g);
            assert_eq!(forward.a() == 4, s == g, "4A must mean equality: {} vs {}", s, g);
        }
    }
}

/// The derived iterator follows variant declaration order, which is the
/// tree-index order `ALL` pins down.
#[test]
fn test_feedback_iteration_matches_tree_order() {
    assert!(Feedback::iter().eq(Feedback::ALL));
    assert_eq!(Feedback::iter().count(), FEEDBACK_COUNT);
    for (index, feedback) in Feedback::iter().enumerate() {
        assert_eq!(feedback.to_index(), index);
        assert_eq!(Feedback::from_index(index), Some(feedback));
    }
}

#[test]
fn test_invalid_text_never_scores() {
    // Rejection happens at the Code boundary, before scoring is possible.
    assert!("123".parse::<Code>().is_err());
    assert!("12345".parse::<Code>().is_err());
    assert!("1123".parse::<Code>().is_err());
    assert!("12a4".parse::<Code>().is_err());
    assert!("".parse::<Code>().is_err());
}
