//! The closed set of 14 feedback values reachable for unique-digit codes.
//!
//! Variant declaration order is load-bearing: it is the index space the
//! precomputed strategy tree is keyed against. Changing it silently
//! misinterprets the tree data.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Feedback for one guess: A digits right in value and position, B digits
/// right in value only.
///
/// Exactly 14 values are reachable when both secret and guess have four
/// pairwise-distinct digits; combinations such as 3A1B are unrepresentable.
/// `Feedback::A4B0` is the unique terminal "solved" value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Feedback {
    /// 4A0B - solved.
    A4B0,
    /// 2A2B
    A2B2,
    /// 1A3B
    A1B3,
    /// 0A4B
    A0B4,
    /// 3A0B
    A3B0,
    /// 2A1B
    A2B1,
    /// 2A0B
    A2B0,
    /// 1A2B
    A1B2,
    /// 0A3B
    A0B3,
    /// 0A0B
    A0B0,
    /// 1A0B
    A1B0,
    /// 1A1B
    A1B1,
    /// 0A2B
    A0B2,
    /// 0A1B
    A0B1,
}

/// Number of distinct feedback values, and the child count of every
/// branch node in the strategy tree.
pub const FEEDBACK_COUNT: usize = 14;

impl Feedback {
    /// All 14 values in tree-index order.
    pub const ALL: [Feedback; FEEDBACK_COUNT] = [
        Feedback::A4B0,
        Feedback::A2B2,
        Feedback::A1B3,
        Feedback::A0B4,
        Feedback::A3B0,
        Feedback::A2B1,
        Feedback::A2B0,
        Feedback::A1B2,
        Feedback::A0B3,
        Feedback::A0B0,
        Feedback::A1B0,
        Feedback::A1B1,
        Feedback::A0B2,
        Feedback::A0B1,
    ];

    /// The count of exact (value and position) matches.
    pub fn a(self) -> u8 {
        self.counts().0
    }

    /// The count of value-only matches.
    pub fn b(self) -> u8 {
        self.counts().1
    }

    /// Returns the (A, B) pair.
    pub fn counts(self) -> (u8, u8) {
        match self {
            Feedback::A4B0 => (4, 0),
            Feedback::A2B2 => (2, 2),
            Feedback::A1B3 => (1, 3),
            Feedback::A0B4 => (0, 4),
            Feedback::A3B0 => (3, 0),
            Feedback::A2B1 => (2, 1),
            Feedback::A2B0 => (2, 0),
            Feedback::A1B2 => (1, 2),
            Feedback::A0B3 => (0, 3),
            Feedback::A0B0 => (0, 0),
            Feedback::A1B0 => (1, 0),
            Feedback::A1B1 => (1, 1),
            Feedback::A0B2 => (0, 2),
            Feedback::A0B1 => (0, 1),
        }
    }

    /// Builds a feedback from raw counts.
    ///
    /// Returns `None` for pairs no unique-digit comparison can produce.
    pub fn from_counts(a: u8, b: u8) -> Option<Feedback> {
        match (a, b) {
            (4, 0) => Some(Feedback::A4B0),
            (2, 2) => Some(Feedback::A2B2),
            (1, 3) => Some(Feedback::A1B3),
            (0, 4) => Some(Feedback::A0B4),
            (3, 0) => Some(Feedback::A3B0),
            (2, 1) => Some(Feedback::A2B1),
            (2, 0) => Some(Feedback::A2B0),
            (1, 2) => Some(Feedback::A1B2),
            (0, 3) => Some(Feedback::A0B3),
            (0, 0) => Some(Feedback::A0B0),
            (1, 0) => Some(Feedback::A1B0),
            (1, 1) => Some(Feedback::A1B1),
            (0, 2) => Some(Feedback::A0B2),
            (0, 1) => Some(Feedback::A0B1),
            _ => None,
        }
    }

    /// Converts to the tree child index (0-13).
    ///
    /// Variant declaration order matches `ALL`, so the discriminant is
    /// the index.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a feedback from a tree child index.
    pub fn from_index(index: usize) -> Option<Feedback> {
        Feedback::ALL.get(index).copied()
    }

    /// Display label, e.g. "2A1B".
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Feedback::A4B0 => "4A0B",
            Feedback::A2B2 => "2A2B",
            Feedback::A1B3 => "1A3B",
            Feedback::A0B4 => "0A4B",
            Feedback::A3B0 => "3A0B",
            Feedback::A2B1 => "2A1B",
            Feedback::A2B0 => "2A0B",
            Feedback::A1B2 => "1A2B",
            Feedback::A0B3 => "0A3B",
            Feedback::A0B0 => "0A0B",
            Feedback::A1B0 => "1A0B",
            Feedback::A1B1 => "1A1B",
            Feedback::A0B2 => "0A2B",
            Feedback::A0B1 => "0A1B",
        }
    }

    /// Parses a label like "2A1B" (case-insensitive).
    #[instrument]
    pub fn from_label(s: &str) -> Option<Feedback> {
        let s = s.trim().to_ascii_uppercase();
        Feedback::iter().find(|fb| fb.label() == s)
    }

    /// The five-row menu layout used when presenting the choices.
    ///
    /// Rows group by A count for readability; the flat tree-index order
    /// is `ALL`, not this.
    pub fn keyboard_rows() -> [&'static [Feedback]; 5] {
        [
            &[Feedback::A0B0],
            &[Feedback::A0B1, Feedback::A0B2, Feedback::A0B3, Feedback::A0B4],
            &[Feedback::A1B0, Feedback::A1B1, Feedback::A1B2, Feedback::A1B3],
            &[Feedback::A2B0, Feedback::A2B1, Feedback::A2B2],
            &[Feedback::A3B0, Feedback::A4B0],
        ]
    }

    /// Returns true for the terminal 4A0B value.
    pub fn is_win(self) -> bool {
        self == Feedback::A4B0
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
