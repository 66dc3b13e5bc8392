//! Core 1A2B domain: codes, feedback, scoring, and canonicalization.

mod code;
mod feedback;
mod mapping;
mod rules;

pub use code::{Code, ParseCodeError};
pub use feedback::{FEEDBACK_COUNT, Feedback};
pub use mapping::CanonicalMapping;
pub use rules::score;
