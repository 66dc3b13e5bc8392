//! Scoring rules for 1A2B.

use super::code::Code;
use super::feedback::Feedback;

/// Scores a guess against a secret.
///
/// For each position: an exact match counts toward A; otherwise a digit
/// that appears anywhere in the secret counts toward B. Both operands are
/// validated `Code`s, so A+B <= 4 and the result is always one of the 14
/// representable `Feedback` values. Pure function, no side effects.
pub fn score(secret: &Code, guess: &Code) -> Feedback {
    let s = secret.digits();
    let g = guess.digits();

    let mut a = 0u8;
    let mut b = 0u8;
    for i in 0..4 {
        if g[i] == s[i] {
            a += 1;
        } else if secret.contains(g[i]) {
            b += 1;
        }
    }

    // Unique digits on both sides rule out pairs like (3, 1).
    Feedback::from_counts(a, b).expect("unique-digit comparison yields a representable feedback")
}
