//! The precomputed strategy tree and its loader.
//!
//! On disk the tree is nested JSON: a branch is a single-key object
//! mapping the next guess to a 14-entry child array, a terminal is the
//! answer string, and an unreachable feedback path is `false`. The whole
//! structure is decoded once at startup into the closed `StrategyNode`
//! variant; no runtime type inspection or key-order assumption survives
//! into traversal.

use crate::game::{Code, FEEDBACK_COUNT};
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument};

/// A node of the precomputed decision tree, in canonical digit space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyNode {
    /// The unique remaining candidate; traversal ends in success.
    Terminal(Code),
    /// The reported feedback path is inconsistent with any valid secret.
    Dead,
    /// The next guess to present, with a child for each of the 14
    /// feedback values (indexed by `Feedback::to_index`).
    Branch {
        /// Canonical guess to present next.
        guess: Code,
        /// Children in feedback index order.
        children: Box<[StrategyNode; FEEDBACK_COUNT]>,
    },
}

/// The decoded, immutable strategy tree.
///
/// Loaded once at process start and shared read-only across sessions
/// behind an `Arc`; sessions hold cursors into it, never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTree {
    root: StrategyNode,
}

impl StrategyTree {
    /// Loads and decodes the answers file.
    ///
    /// # Errors
    ///
    /// `TreeError::Io` if the file cannot be read, `TreeError::Json` if
    /// it is not valid JSON, `TreeError::Malformed` if the JSON does not
    /// have the expected shape. All are fatal at startup.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&text)?;
        let tree = Self::from_json(&value)?;
        info!("Strategy tree loaded");
        Ok(tree)
    }

    /// Decodes a parsed JSON value into a tree.
    ///
    /// The on-disk root is the 14-entry child array keyed by the feedback
    /// of the user's own clue. Any clue is `0123` in canonical space, so
    /// the in-memory root is a branch with that guess.
    pub fn from_json(value: &Value) -> Result<Self, TreeError> {
        let children = decode_children(value)?;
        let guess = Code::new([0, 1, 2, 3]).expect("0123 is a valid code");
        Ok(Self {
            root: StrategyNode::Branch { guess, children },
        })
    }

    /// Returns the root node (always a branch).
    pub fn root(&self) -> &StrategyNode {
        &self.root
    }
}

fn decode_children(value: &Value) -> Result<Box<[StrategyNode; FEEDBACK_COUNT]>, TreeError> {
    let entries = value
        .as_array()
        .ok_or_else(|| TreeError::malformed("branch children must be an array"))?;
    if entries.len() != FEEDBACK_COUNT {
        return Err(TreeError::malformed(format!(
            "branch must have exactly {} children, found {}",
            FEEDBACK_COUNT,
            entries.len()
        )));
    }

    let nodes = entries
        .iter()
        .map(decode_node)
        .collect::<Result<Vec<_>, _>>()?;
    let children: Box<[StrategyNode; FEEDBACK_COUNT]> = nodes
        .try_into()
        .expect("length checked above");
    Ok(children)
}

fn decode_node(value: &Value) -> Result<StrategyNode, TreeError> {
    match value {
        Value::String(answer) => {
            let code = answer
                .parse::<Code>()
                .map_err(|e| TreeError::malformed(format!("bad answer {:?}: {}", answer, e)))?;
            Ok(StrategyNode::Terminal(code))
        }
        Value::Bool(false) => Ok(StrategyNode::Dead),
        Value::Object(map) => {
            // A branch is a single-entry object; the lone key is the next
            // guess. Decoded into an explicit pair here so traversal never
            // depends on object key order.
            if map.len() != 1 {
                return Err(TreeError::malformed(format!(
                    "branch object must have exactly one key, found {}",
                    map.len()
                )));
            }
            let (key, child_value) = map.iter().next().expect("map has one entry");
            let guess = key
                .parse::<Code>()
                .map_err(|e| TreeError::malformed(format!("bad guess {:?}: {}", key, e)))?;
            let children = decode_children(child_value)?;
            Ok(StrategyNode::Branch { guess, children })
        }
        other => Err(TreeError::malformed(format!(
            "unexpected node value: {}",
            other
        ))),
    }
}

/// Error loading or decoding the answers file.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum TreeError {
    /// The file could not be read.
    #[display("failed to read answers file: {}", _0)]
    #[from]
    Io(std::io::Error),

    /// The file is not valid JSON.
    #[display("answers file is not valid JSON: {}", _0)]
    #[from]
    Json(serde_json::Error),

    /// The JSON does not have the expected node structure.
    #[display("answers data is malformed: {}", _0)]
    Malformed(String),
}

impl TreeError {
    fn malformed(reason: impl Into<String>) -> Self {
        TreeError::Malformed(reason.into())
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Io(e) => Some(e),
            TreeError::Json(e) => Some(e),
            TreeError::Malformed(_) => None,
        }
    }
}
