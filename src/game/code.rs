//! The `Code` type: an ordered sequence of four pairwise-distinct digits.
//!
//! Validation lives in the constructors, so any `Code` in circulation
//! already satisfies the game's invariants. Scoring and canonicalization
//! never re-check them.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A four-digit code with pairwise-distinct digits, each in 0-9.
///
/// Immutable once constructed. Used for secrets, guesses, and clues alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Code([u8; 4]);

impl Code {
    /// Creates a code from raw digits, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns `ParseCodeError::NonDigit` if a value exceeds 9, or
    /// `ParseCodeError::RepeatedDigit` if any two digits coincide.
    pub fn new(digits: [u8; 4]) -> Result<Self, ParseCodeError> {
        for (i, &d) in digits.iter().enumerate() {
            if d > 9 {
                return Err(ParseCodeError::NonDigit);
            }
            if digits[..i].contains(&d) {
                return Err(ParseCodeError::RepeatedDigit);
            }
        }
        Ok(Self(digits))
    }

    /// Draws a uniformly random code: an ordered 4-permutation of 0-9.
    ///
    /// Uniqueness is guaranteed by sampling without replacement, not by
    /// rejection. The thread rng is seeded per process.
    #[instrument]
    pub fn random() -> Self {
        let mut digits: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut rng = rand::rng();
        let (picked, _) = digits.partial_shuffle(&mut rng, 4);
        Self([picked[0], picked[1], picked[2], picked[3]])
    }

    /// Returns the digits in order.
    pub fn digits(&self) -> [u8; 4] {
        self.0
    }

    /// Returns true if the given digit appears anywhere in the code.
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl FromStr for Code {
    type Err = ParseCodeError;

    /// Parses exactly 4 ASCII digits, pairwise distinct.
    ///
    /// Anything else (wrong length, non-digit bytes, repeats) is rejected
    /// here, before the text can reach scoring or canonicalization.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return Err(ParseCodeError::Length);
        }
        let mut digits = [0u8; 4];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_digit() {
                return Err(ParseCodeError::NonDigit);
            }
            digits[i] = b - b'0';
        }
        Self::new(digits)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// Error rejecting text that is not a valid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParseCodeError {
    /// Input is not exactly 4 characters.
    #[display("code must be exactly 4 digits")]
    Length,

    /// Input contains a non-digit character or an out-of-range value.
    #[display("code may contain only the digits 0-9")]
    NonDigit,

    /// Two digits in the input coincide.
    #[display("code digits must be pairwise distinct")]
    RepeatedDigit,
}

impl std::error::Error for ParseCodeError {}
