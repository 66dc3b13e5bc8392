//! Online solver engine: canonical mapping plus a cursor into the tree.

use super::tree::{StrategyNode, StrategyTree};
use crate::game::{CanonicalMapping, Code, Feedback};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One solver run: the mapping derived from the user's clue and the
/// current position in the shared strategy tree.
///
/// The cursor is the list of feedback indices taken from the root, so the
/// solver stays `'static` and `Send` while the tree itself is shared
/// read-only. Re-walking the path on each step is O(depth), and depth is
/// bounded by the tree (practically at most 7 guesses).
#[derive(Debug, Clone)]
pub struct Solver {
    tree: Arc<StrategyTree>,
    mapping: CanonicalMapping,
    path: Vec<usize>,
}

/// Outcome of consuming one reported feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStep {
    /// The next guess to present, in real digits.
    Guess(Code),
    /// The final answer, in real digits; the run is over.
    Solved(Code),
    /// The reported feedback is inconsistent with every valid secret.
    /// The cursor has not moved; the same selection is still pending.
    Inconsistent,
}

impl Solver {
    /// Starts a run from the user's initial clue.
    ///
    /// The clue itself is the first pending guess: the root branch carries
    /// canonical `0123`, which maps back to the clue exactly.
    #[instrument(skip(tree))]
    pub fn new(tree: Arc<StrategyTree>, clue: &Code) -> Self {
        let mapping = CanonicalMapping::new(clue);
        Self {
            tree,
            mapping,
            path: Vec::new(),
        }
    }

    /// Returns the canonical mapping for this run.
    pub fn mapping(&self) -> &CanonicalMapping {
        &self.mapping
    }

    /// The guess currently awaiting feedback, in real digits.
    ///
    /// `None` only if the cursor sits on a dead node, which the session
    /// never allows to persist.
    pub fn pending_guess(&self) -> Option<Code> {
        match self.cursor() {
            StrategyNode::Branch { guess, .. } => Some(self.mapping.to_real(guess)),
            StrategyNode::Terminal(answer) => Some(self.mapping.to_real(answer)),
            StrategyNode::Dead => None,
        }
    }

    /// Consumes one reported feedback and moves the cursor.
    ///
    /// On `Inconsistent` the cursor stays put so the human can correct
    /// the selection and retry.
    #[instrument(skip(self), fields(depth = self.path.len()))]
    pub fn advance(&mut self, feedback: Feedback) -> SolverStep {
        let index = feedback.to_index();
        let step = match walk(self.tree.root(), &self.path) {
            StrategyNode::Branch { children, .. } => match &children[index] {
                StrategyNode::Terminal(answer) => {
                    let answer = self.mapping.to_real(answer);
                    debug!(%answer, "Reached terminal node");
                    Some(SolverStep::Solved(answer))
                }
                StrategyNode::Dead => {
                    debug!(%feedback, "Feedback leads to dead node, holding cursor");
                    None
                }
                StrategyNode::Branch { guess, .. } => {
                    Some(SolverStep::Guess(self.mapping.to_real(guess)))
                }
            },
            _ => {
                // The session clears the run on Solved, so advancing past a
                // terminal is a dispatcher contract violation.
                warn!("advance called on a non-branch cursor");
                None
            }
        };

        match step {
            Some(step) => {
                self.path.push(index);
                step
            }
            None => SolverStep::Inconsistent,
        }
    }

    fn cursor(&self) -> &StrategyNode {
        walk(self.tree.root(), &self.path)
    }
}

/// Follows a feedback-index path from a node. The path only ever runs
/// through branches.
fn walk<'t>(mut node: &'t StrategyNode, path: &[usize]) -> &'t StrategyNode {
    for &index in path {
        match node {
            StrategyNode::Branch { children, .. } => node = &children[index],
            _ => break,
        }
    }
    node
}
