//! Element — a persistent chunk of a look-and-say chemistry

use crate::say::RuleId;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An element is a chunk string that keeps recurring, like `'22'` (Hydrogen)
/// in Conway's chemistry. Two elements are equal when their strings match
/// and they were produced by the same say rule.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    string: String,
    #[serde(skip)]
    rule: RuleId,
    name: String,
    /// Strings of the elements this one becomes one day later, in order
    decay: Vec<String>,
}

impl Element {
    pub(crate) fn new(string: impl Into<String>, rule: RuleId) -> Self {
        let string = string.into();
        Self {
            name: string.clone(),
            string,
            rule,
            decay: Vec::new(),
        }
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// Strings of the decay products. Resolve them to elements with
    /// [`Chemistry::decay_of`](super::Chemistry::decay_of).
    pub fn decay(&self) -> &[String] {
        &self.decay
    }

    pub(crate) fn set_decay(&mut self, decay: Vec<String>) {
        self.decay = decay;
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string && self.rule == other.rule
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
        self.rule.hash(state);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
