//! Cosmology — how exotic chunks age into elements
//!
//! Conway's Cosmological Theorem says every string eventually decays into a
//! compound of common and transuranic elements. This module follows chunks
//! forward until they settle, and searches backwards for the strings that
//! could have produced a given one.

use crate::chemistry::Chemistry;
use crate::error::{LookAndSayError, Result};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Bounds for forward and backward searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CosmologyLimits {
    /// Days followed forward, or generations followed backward
    pub max_days: usize,
    /// Longest run considered when reconstructing an ancestor
    pub max_run: usize,
}

impl Default for CosmologyLimits {
    fn default() -> Self {
        Self {
            max_days: 64,
            max_run: 9,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cosmology {
    chemistry: Chemistry,
    pub limits: CosmologyLimits,
    alphabet: Vec<char>,
}

impl Cosmology {
    /// Uses the characters of the chemistry's elements as the alphabet
    pub fn new(chemistry: Chemistry) -> Self {
        let alphabet: BTreeSet<char> = chemistry
            .elements()
            .iter()
            .flat_map(|e| e.string().chars())
            .collect();
        Self {
            chemistry,
            limits: CosmologyLimits::default(),
            alphabet: alphabet.into_iter().collect(),
        }
    }

    /// Conway's chemistry with the transuranic elements, over the digits
    pub fn conway() -> Result<Self> {
        let mut chemistry = Chemistry::conway();
        chemistry.generate_elements(&["9"])?;
        Ok(Self::new(chemistry).with_alphabet("123456789".chars()))
    }

    pub fn with_alphabet(mut self, alphabet: impl IntoIterator<Item = char>) -> Self {
        let alphabet: BTreeSet<char> = alphabet.into_iter().collect();
        self.alphabet = alphabet.into_iter().collect();
        self
    }

    pub fn with_limits(mut self, limits: CosmologyLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn chemistry(&self) -> &Chemistry {
        &self.chemistry
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn is_element(&self, chunk: &str) -> bool {
        self.chemistry.element(chunk).is_some()
    }

    fn decay(&self, string: &str) -> Result<Vec<String>> {
        let said = self.chemistry.look_and_say().say_what_you_see(string)?;
        Ok(self.chemistry.split_rule().split(&said))
    }

    /// Decay of `string` and of every non-element chunk it passes through,
    /// until only elements remain
    pub fn decay_tree(&self, string: &str) -> Result<BTreeMap<String, Vec<String>>> {
        let mut tree = BTreeMap::new();
        if self.is_element(string) {
            return Ok(tree);
        }
        let mut frontier = vec![string.to_string()];
        for day in 0..self.limits.max_days {
            let mut next = Vec::new();
            for node in frontier {
                if tree.contains_key(&node) {
                    continue;
                }
                let decay = self.decay(&node)?;
                next.extend(
                    decay
                        .iter()
                        .filter(|chunk| !self.is_element(chunk))
                        .cloned(),
                );
                tree.insert(node, decay);
            }
            next.retain(|chunk| !tree.contains_key(chunk));
            if next.is_empty() {
                debug!("Decay tree of '{}' settled after {} days", string, day + 1);
                return Ok(tree);
            }
            frontier = next;
        }
        Err(LookAndSayError::DayLimitExceeded {
            string: string.to_string(),
            days: self.limits.max_days,
        })
    }

    /// Days until `string` splits into elements only
    pub fn days_until_common(&self, string: &str) -> Result<usize> {
        let mut current = string.to_string();
        for day in 0..=self.limits.max_days {
            let chunks = self.chemistry.split_rule().split(&current);
            if chunks.iter().all(|chunk| self.is_element(chunk)) {
                return Ok(day);
            }
            current = self.chemistry.look_and_say().say_what_you_see(&current)?;
        }
        Err(LookAndSayError::DayLimitExceeded {
            string: string.to_string(),
            days: self.limits.max_days,
        })
    }

    /// Every string over the alphabet whose say is `string`, in sorted order
    pub fn ancestors(&self, string: &str) -> Vec<String> {
        let target: Vec<char> = string.chars().collect();
        let mut found = BTreeSet::new();
        let mut runs = Vec::new();
        self.parse_runs(&target, None, &mut runs, &mut found);
        found.into_iter().collect()
    }

    /// Read `rest` as spoken runs, each on a different character than the
    /// one before
    fn parse_runs(
        &self,
        rest: &[char],
        previous: Option<char>,
        runs: &mut Vec<(usize, char)>,
        found: &mut BTreeSet<String>,
    ) {
        if rest.is_empty() {
            found.insert(
                runs.iter()
                    .flat_map(|&(count, ch)| std::iter::repeat(ch).take(count))
                    .collect(),
            );
            return;
        }
        let rule = self.chemistry.look_and_say().rule();
        for &ch in &self.alphabet {
            if previous == Some(ch) {
                continue;
            }
            for count in 1..=self.limits.max_run {
                let Ok(word) = rule.speak(count, ch) else {
                    continue;
                };
                let word: Vec<char> = word.chars().collect();
                if rest.starts_with(&word) {
                    runs.push((count, ch));
                    self.parse_runs(&rest[word.len()..], Some(ch), runs, found);
                    runs.pop();
                }
            }
        }
    }

    /// Longest chain of ancestors behind `string`, capped at `max_days`
    pub fn ancestry_depth(&self, string: &str) -> usize {
        self.depth_within(string, self.limits.max_days)
    }

    fn depth_within(&self, string: &str, budget: usize) -> usize {
        if budget == 0 {
            return 0;
        }
        self.ancestors(string)
            .iter()
            .map(|ancestor| 1 + self.depth_within(ancestor, budget - 1))
            .max()
            .unwrap_or(0)
    }
}
