//! Variable batch builder.
//!
//! Process steps hand the service flat, ordered key/value argument lists;
//! this module turns them into validated maps before anything is written
//! downstream.

use std::collections::HashMap;

use caseflow_types::{OrchestrationError, Result};

/// A transient batch of string variables written to one or both
/// collaborators. Key uniqueness is required; on duplicate keys the last
/// write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBatch {
    entries: HashMap<String, String>,
}

impl VariableBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a flat `[key, value, key, value, ...]` list. Fails with
    /// `InvalidMethodArgument` on an odd-length list.
    pub fn from_pairs(pairs: &[&str]) -> Result<Self> {
        if pairs.len() % 2 != 0 {
            return Err(OrchestrationError::InvalidMethodArgument(
                "must supply key/value pairs".into(),
            ));
        }

        let mut entries = HashMap::with_capacity(pairs.len() / 2);
        for pair in pairs.chunks_exact(2) {
            entries.insert(pair[0].to_string(), pair[1].to_string());
        }
        Ok(Self { entries })
    }

    /// Every key mapped to the empty string — "clear these fields".
    pub fn blank(keys: &[&str]) -> Self {
        let entries = keys.iter().map(|k| (k.to_string(), String::new())).collect();
        Self { entries }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }
}

impl From<HashMap<String, String>> for VariableBatch {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}
