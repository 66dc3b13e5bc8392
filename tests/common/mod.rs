//! Shared fixtures for integration tests.
#![allow(dead_code)]

use bulls_and_cows::{Code, Feedback, StrategyTree, score};
use serde_json::Value;

/// All 5040 valid codes, in lexicographic order.
pub fn all_codes() -> Vec<Code> {
    let mut codes = Vec::with_capacity(5040);
    for a in 0u8..10 {
        for b in 0u8..10 {
            for c in 0u8..10 {
                for d in 0u8..10 {
                    if let Ok(code) = Code::new([a, b, c, d]) {
                        codes.push(code);
                    }
                }
            }
        }
    }
    codes
}

/// Builds a consistent strategy tree over the full canonical secret set,
/// in the same nested JSON format the loader consumes.
///
/// Strategy: at each branch, guess the first remaining candidate. Not
/// minimax-optimal, but every feedback child partitions the candidates
/// consistently, which is all the traversal tests need.
pub fn consistent_tree() -> StrategyTree {
    let value = consistent_tree_json();
    StrategyTree::from_json(&value).expect("builder emits well-formed data")
}

/// The raw JSON for `consistent_tree`, for loader tests.
pub fn consistent_tree_json() -> Value {
    let candidates = all_codes();
    let root_guess: Code = "0123".parse().unwrap();
    children_value(&candidates, &root_guess)
}

fn children_value(candidates: &[Code], guess: &Code) -> Value {
    let entries = Feedback::ALL
        .iter()
        .map(|&feedback| {
            let bucket: Vec<Code> = candidates
                .iter()
                .copied()
                .filter(|candidate| score(candidate, guess) == feedback)
                .collect();
            match bucket.as_slice() {
                [] => Value::Bool(false),
                [only] => Value::String(only.to_string()),
                _ => {
                    let next = bucket[0];
                    let mut map = serde_json::Map::new();
                    map.insert(next.to_string(), children_value(&bucket, &next));
                    Value::Object(map)
                }
            }
        })
        .collect();
    Value::Array(entries)
}
