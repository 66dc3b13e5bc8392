//! Digit canonicalization for the solver.
//!
//! The strategy tree is expressed in a canonical digit space where the
//! user's clue is always `0123`. A `CanonicalMapping` is the permutation
//! that relabels between that space and the real digits the human sees.

use super::code::Code;
use tracing::instrument;

/// A bijection between canonical digits and real digits, derived once
/// from the user's initial clue.
///
/// Forward direction (canonical -> real): the clue's digits occupy
/// canonical positions 0-3 in their given order; the six digits absent
/// from the clue fill positions 4-9 in ascending order. Fixed for the
/// lifetime of one solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalMapping {
    /// forward[canonical] = real
    forward: [u8; 10],
    /// inverse[real] = canonical
    inverse: [u8; 10],
}

impl CanonicalMapping {
    /// Builds the mapping from a clue.
    ///
    /// The clue is a validated `Code`, so the construction always yields
    /// a permutation of the 10 digits.
    #[instrument]
    pub fn new(clue: &Code) -> Self {
        let mut forward = [0u8; 10];
        let clue_digits = clue.digits();
        forward[..4].copy_from_slice(&clue_digits);

        // Remaining digits, ascending, fill canonical positions 4-9.
        let mut next = 4;
        for d in 0u8..10 {
            if !clue.contains(d) {
                forward[next] = d;
                next += 1;
            }
        }

        let mut inverse = [0u8; 10];
        for (canonical, &real) in forward.iter().enumerate() {
            inverse[real as usize] = canonical as u8;
        }

        Self { forward, inverse }
    }

    /// Translates a canonical-space code into real digits.
    pub fn to_real(&self, code: &Code) -> Code {
        self.apply(&self.forward, code)
    }

    /// Translates a real-digit code into canonical space.
    ///
    /// By construction `to_canonical(clue) == 0123`.
    pub fn to_canonical(&self, code: &Code) -> Code {
        self.apply(&self.inverse, code)
    }

    fn apply(&self, table: &[u8; 10], code: &Code) -> Code {
        let digits = code.digits().map(|d| table[d as usize]);
        // A permutation applied digit-wise preserves distinctness.
        Code::new(digits).expect("permutation of a valid code is a valid code")
    }
}
