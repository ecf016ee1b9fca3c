//! Chemistry — the persistent elements of a look-and-say rule
//!
//! Any sufficiently evolved string decomposes into a finite set of chunks
//! that keep reappearing: the elements. Discovery follows every chunk
//! reachable from the seeds until nothing new appears, then discards chunks
//! that never recur in anyone's decay. The decay relation between what is
//! left forms a non-negative integer matrix whose dominant eigenvalue is the
//! growth rate of the sequence (Conway's constant for the decimal rule) and
//! whose dominant eigenvector gives the limiting abundance of each element.
//!
//! Discovery only terminates when the say rule and split rule are compatible
//! (iterated decay of every reachable chunk eventually cycles through a
//! finite set). [`DiscoveryLimits`] turns a runaway search into an error.

mod element;
mod naming;
mod spectrum;
mod table;

pub use element::Element;
pub use table::{PeriodicEntry, PeriodicTable};

use crate::error::{LookAndSayError, Result};
use crate::say::LookAndSay;
use crate::split::SplitRule;
use log::{debug, info, warn};
use nalgebra::DMatrix;
use serde::Serialize;
use spectrum::Spectrum;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Abundances are reported to this many decimal places by default
pub const DEFAULT_DECIMAL_PLACES: u32 = 8;
/// Abundances sum to this by default (percentages)
pub const DEFAULT_ABUNDANCE_SUM: f64 = 100.0;

/// Safety bounds for element discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveryLimits {
    /// Maximum number of distinct chunks explored, transient ones included
    pub max_elements: usize,
    /// Maximum length of a single chunk, in characters
    pub max_chunk_len: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self {
            max_elements: 100_000,
            max_chunk_len: 4_096,
        }
    }
}

/// Criteria for [`Chemistry::order_elements`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementOrder {
    /// Most abundant first
    Abundance,
    /// Alphabetically by name
    Name,
    /// Lexicographically by string
    String,
    /// Shortest string first
    StringLength,
}

impl ElementOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementOrder::Abundance => "abundance",
            ElementOrder::Name => "name",
            ElementOrder::String => "string",
            ElementOrder::StringLength => "string length",
        }
    }
}

impl FromStr for ElementOrder {
    type Err = LookAndSayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "abundance" => Ok(ElementOrder::Abundance),
            "name" => Ok(ElementOrder::Name),
            "string" => Ok(ElementOrder::String),
            "string length" => Ok(ElementOrder::StringLength),
            other => Err(LookAndSayError::InvalidOrdering(other.to_string())),
        }
    }
}

impl fmt::Display for ElementOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The elements of one say rule under one split rule
#[derive(Debug, Clone)]
pub struct Chemistry {
    las: LookAndSay,
    split: SplitRule,
    elements: Vec<Element>,
    /// Position of each element string in `elements`
    positions: HashMap<String, usize>,
    pub limits: DiscoveryLimits,
    /// Dominant eigenpair of the current element set
    spectrum: Option<Spectrum>,
}

impl Chemistry {
    /// The caller is responsible for `split` being valid for `las`
    pub fn new(las: LookAndSay, split: SplitRule) -> Self {
        Self {
            las,
            split,
            elements: Vec::new(),
            positions: HashMap::new(),
            limits: DiscoveryLimits::default(),
            spectrum: None,
        }
    }

    /// Conway's chemistry: standard decimal rule with his Splitting Theorem
    pub fn conway() -> Self {
        Self::new(LookAndSay::standard(), SplitRule::Conway)
    }

    /// Binary chemistry splitting after every `0`. Valid whenever the rule
    /// maps `a^b` to `[b]a` with `[b]` a binary word starting with `1`.
    pub fn binary(las: LookAndSay) -> Self {
        Self::new(las, SplitRule::after(["0"]))
    }

    /// Chemistry for a named say rule, `None` when no split rule is known
    /// to give it one. Only the decimal, binary and negafibnary rules have
    /// a chemistry.
    pub fn for_rule(name: &str) -> Option<Self> {
        match name {
            "decimal" | "standard" | "conway" => Some(Self::conway()),
            "binary" => Some(Self::binary(LookAndSay::binary())),
            "negafibnary" => Some(Self::binary(LookAndSay::negafibnary())),
            _ => None,
        }
    }

    pub fn with_limits(mut self, limits: DiscoveryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn look_and_say(&self) -> &LookAndSay {
        &self.las
    }

    pub fn split_rule(&self) -> &SplitRule {
        &self.split
    }

    /// The periodic table, in its current order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, string: &str) -> Option<&Element> {
        self.positions.get(string).map(|&i| &self.elements[i])
    }

    pub fn element_by_name(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.element(element.string()).is_some_and(|e| e == element)
    }

    /// Decay products of `element` as members of this chemistry
    pub fn decay_of(&self, element: &Element) -> Vec<&Element> {
        element
            .decay()
            .iter()
            .filter_map(|product| self.element(product))
            .collect()
    }

    pub fn clear_elements(&mut self) {
        self.elements.clear();
        self.positions.clear();
        self.spectrum = None;
    }

    /// Replace the elements with those persisting in the sequences of `seeds`.
    ///
    /// Seeds are taken to be mature: discovery starts from their immediate
    /// successors. On error the previous elements are kept.
    pub fn generate_elements<S: AsRef<str>>(&mut self, seeds: &[S]) -> Result<()> {
        self.collect_elements(seeds, true)
    }

    /// Like [`generate_elements`](Self::generate_elements) but keeps the
    /// current elements in the pool
    pub fn accumulate_elements<S: AsRef<str>>(&mut self, seeds: &[S]) -> Result<()> {
        self.collect_elements(seeds, false)
    }

    fn collect_elements<S: AsRef<str>>(&mut self, seeds: &[S], reset: bool) -> Result<()> {
        let mut decays: HashMap<String, Vec<String>> = if reset {
            HashMap::new()
        } else {
            self.elements
                .iter()
                .map(|e| (e.string().to_string(), e.decay().to_vec()))
                .collect()
        };

        let mut worklist = Vec::new();
        for seed in seeds {
            let seed = seed.as_ref();
            if seed.is_empty() {
                warn!("Skipping empty seed");
                continue;
            }
            let successor = self.las.say_what_you_see(seed)?;
            worklist.extend(self.split.split(&successor).into_iter().rev());
        }

        self.discover(&mut decays, worklist)?;
        let explored = decays.len();
        let persistent = remove_extinct(&decays);
        info!(
            "Discovered {} chunks, {} persistent elements",
            explored,
            persistent.len()
        );

        let rule = self.las.id();
        let mut elements: Vec<Element> = persistent
            .into_iter()
            .map(|string| {
                let mut element = Element::new(string, rule);
                element.set_decay(decays.get(string).cloned().unwrap_or_default());
                element
            })
            .collect();
        elements.sort_by(|a, b| a.string().cmp(b.string()));

        self.elements = elements;
        self.spectrum = None;
        self.name_elements();
        Ok(())
    }

    /// Depth-first closure over decay: a chunk's decay is expanded before
    /// the next sibling chunk is looked at
    fn discover(
        &self,
        decays: &mut HashMap<String, Vec<String>>,
        mut worklist: Vec<String>,
    ) -> Result<()> {
        while let Some(chunk) = worklist.pop() {
            if decays.contains_key(&chunk) {
                continue;
            }
            if chunk.chars().count() > self.limits.max_chunk_len {
                return Err(LookAndSayError::ChunkTooLong(self.limits.max_chunk_len));
            }
            let decay = self.split.split(&self.las.say_what_you_see(&chunk)?);
            worklist.extend(decay.iter().rev().cloned());
            decays.insert(chunk, decay);
            if decays.len() > self.limits.max_elements {
                return Err(LookAndSayError::TooManyElements(self.limits.max_elements));
            }
        }
        Ok(())
    }

    fn name_elements(&mut self) {
        if self.las.is_conway() {
            for element in &mut self.elements {
                if let Some(name) = naming::conway_name(element.string()) {
                    element.set_name(name);
                }
            }
            self.elements
                .sort_by_key(|e| naming::conway_number(e.string()));
            self.reindex();
        } else {
            self.reindex();
            self.name_sequentially();
        }
    }

    fn name_sequentially(&mut self) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.set_name(format!("E{}", i + 1));
        }
    }

    fn reindex(&mut self) {
        self.positions = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.string().to_string(), i))
            .collect();
    }

    /// Entry `(i, j)` counts element `i` in the decay of element `j`
    pub fn decay_matrix(&self) -> DMatrix<u32> {
        let n = self.elements.len();
        let mut matrix = DMatrix::zeros(n, n);
        for (j, element) in self.elements.iter().enumerate() {
            for product in element.decay() {
                if let Some(&i) = self.positions.get(product) {
                    matrix[(i, j)] += 1;
                }
            }
        }
        matrix
    }

    /// Reorder the periodic table.
    ///
    /// Outside Conway's chemistry the elements are renamed `E1, E2, ...`
    /// after their new positions unless `rename` is false.
    pub fn order_elements(&mut self, order: ElementOrder, reverse: bool, rename: bool) -> Result<()> {
        match order {
            ElementOrder::Abundance => {
                let abundances = self.abundances(DEFAULT_DECIMAL_PLACES, DEFAULT_ABUNDANCE_SUM)?;
                let by_string: HashMap<String, f64> = self
                    .elements
                    .iter()
                    .map(|e| e.string().to_string())
                    .zip(abundances)
                    .collect();
                let abundance = |e: &Element| by_string.get(e.string()).copied().unwrap_or(0.0);
                self.elements
                    .sort_by(|a, b| abundance(a).total_cmp(&abundance(b)));
                self.elements.reverse();
            }
            ElementOrder::Name => self.elements.sort_by(|a, b| a.name().cmp(b.name())),
            ElementOrder::String => self.elements.sort_by(|a, b| a.string().cmp(b.string())),
            ElementOrder::StringLength => self.elements.sort_by_key(|e| e.string().chars().count()),
        }
        debug!("Ordered {} elements by {}", self.elements.len(), order);
        self.finish_ordering(reverse, rename);
        Ok(())
    }

    /// Parse `criterion` first, so an unknown name changes nothing
    pub fn order_elements_named(&mut self, criterion: &str, reverse: bool, rename: bool) -> Result<()> {
        let order = criterion.parse::<ElementOrder>()?;
        self.order_elements(order, reverse, rename)
    }

    /// Reorder by a caller-supplied key
    pub fn order_elements_by_key<K, F>(&mut self, key: F, reverse: bool, rename: bool)
    where
        K: Ord,
        F: FnMut(&Element) -> K,
    {
        self.elements.sort_by_key(key);
        self.finish_ordering(reverse, rename);
    }

    fn finish_ordering(&mut self, reverse: bool, rename: bool) {
        if reverse {
            self.elements.reverse();
        }
        self.reindex();
        if rename && !self.las.is_conway() {
            self.name_sequentially();
        }
    }
}

/// Repeatedly keep only the chunks that appear in the decay of a kept chunk,
/// until nothing more drops out
fn remove_extinct(decays: &HashMap<String, Vec<String>>) -> HashSet<&str> {
    let mut alive: HashSet<&str> = decays.keys().map(String::as_str).collect();
    loop {
        let recurring: HashSet<&str> = alive
            .iter()
            .filter_map(|chunk| decays.get(*chunk))
            .flatten()
            .map(String::as_str)
            .collect();
        if recurring.len() < alive.len() {
            debug!("Pruned {} extinct chunks", alive.len() - recurring.len());
            alive = recurring;
        } else {
            return alive;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::SplitFactory;

    const PU: &str = "312211322212221121123222119";
    const NP: &str = "13112221133211322112211213322119";

    fn conway_from_nine() -> Chemistry {
        let mut chem = Chemistry::conway();
        chem.generate_elements(&["9"]).unwrap();
        chem
    }

    fn negafibnary() -> Chemistry {
        let mut chem = Chemistry::binary(LookAndSay::negafibnary());
        chem.generate_elements(&["0"]).unwrap();
        chem
    }

    #[test]
    fn test_92_plus_2_elements() {
        let chem = conway_from_nine();
        assert_eq!(chem.len(), 94);
        assert!(chem.element(PU).is_some());
        assert!(chem.element(NP).is_some());
    }

    #[test]
    fn test_common_elements_from_one() {
        let mut chem = Chemistry::conway();
        chem.generate_elements(&["1"]).unwrap();
        assert_eq!(chem.len(), 92);
    }

    #[test]
    fn test_conway_names_and_order() {
        let chem = conway_from_nine();
        let names: Vec<&str> = chem.elements().iter().map(Element::name).collect();
        assert_eq!(&names[..3], &["H", "He", "Li"]);
        assert_eq!(&names[91..], &["U", "Pu9", "Np9"]);
        assert_eq!(chem.element_by_name("H").unwrap().string(), "22");
        let h = chem.element("22").unwrap();
        assert_eq!(chem.decay_of(h), vec![h]);
    }

    #[test]
    fn test_closure() {
        let chem = conway_from_nine();
        for element in chem.elements() {
            let products = chem.decay_of(element);
            assert_eq!(products.len(), element.decay().len(), "{element}");
            for product in products {
                assert!(chem.contains(product));
                assert!(std::ptr::eq(product, chem.element(product.string()).unwrap()));
            }
        }
    }

    #[test]
    fn test_pruning_is_a_fixed_point() {
        let chem = conway_from_nine();
        let decays: HashMap<String, Vec<String>> = chem
            .elements()
            .iter()
            .map(|e| (e.string().to_string(), e.decay().to_vec()))
            .collect();
        assert_eq!(remove_extinct(&decays).len(), chem.len());
    }

    #[test]
    fn test_pruning_drops_transients() {
        let decays: HashMap<String, Vec<String>> = [
            ("a", vec!["b"]),
            ("b", vec!["c", "b"]),
            ("c", vec!["b"]),
            ("x", vec!["a"]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
        .collect();
        let alive = remove_extinct(&decays);
        assert_eq!(alive, HashSet::from(["b", "c"]));
    }

    #[test]
    fn test_decay_matrix_follows_order() {
        let mut chem = negafibnary();
        let check = |chem: &Chemistry| {
            let m = chem.decay_matrix();
            assert_eq!(m.shape(), (chem.len(), chem.len()));
            for (j, ej) in chem.elements().iter().enumerate() {
                for (i, ei) in chem.elements().iter().enumerate() {
                    let count = ej.decay().iter().filter(|d| *d == ei.string()).count();
                    assert_eq!(m[(i, j)] as usize, count);
                }
            }
        };
        check(&chem);
        chem.order_elements(ElementOrder::Abundance, false, true).unwrap();
        check(&chem);
        chem.order_elements(ElementOrder::StringLength, true, false).unwrap();
        check(&chem);
    }

    #[test]
    fn test_negafibnary_elements() {
        let mut chem = negafibnary();
        let strings: HashSet<&str> = chem.elements().iter().map(Element::string).collect();
        assert_eq!(strings, HashSet::from(["10", "1110"]));

        chem.order_elements(ElementOrder::Abundance, false, true).unwrap();
        let e1 = chem.element_by_name("E1").unwrap();
        let e2 = chem.element_by_name("E2").unwrap();
        assert_eq!(e1.string(), "1110");
        assert_eq!(e2.string(), "10");
        assert_eq!(chem.decay_of(e1), vec![e2, e1]);
        assert_eq!(chem.decay_of(e2), vec![e1]);
    }

    #[test]
    fn test_binary_elements() {
        let mut chem = Chemistry::binary(LookAndSay::binary());
        chem.generate_elements(&["1"]).unwrap();
        let strings: Vec<&str> = chem.elements().iter().map(Element::string).collect();
        assert_eq!(
            strings,
            vec!["1", "10", "100", "11", "110", "1100", "1110", "11100", "11110", "111100"]
        );
        assert_eq!(chem.elements()[0].name(), "E1");
    }

    #[test]
    fn test_accumulate_elements() {
        let mut chem = Chemistry::binary(LookAndSay::binary());
        chem.generate_elements(&["0"]).unwrap();
        assert_eq!(chem.len(), 8);
        assert!(chem.element("1").is_none());
        chem.accumulate_elements(&["1"]).unwrap();
        assert_eq!(chem.len(), 10);
        chem.generate_elements(&["0"]).unwrap();
        assert_eq!(chem.len(), 8);
    }

    #[test]
    fn test_cross_chemistry_identity() {
        let mut binary = Chemistry::binary(LookAndSay::binary());
        binary.generate_elements(&["0"]).unwrap();
        let nega = negafibnary();
        let a = binary.element("10").unwrap();
        let b = binary.element("1110").unwrap();
        let c = nega.element("10").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(!nega.contains(a));
        assert!(binary.contains(a));
    }

    #[test]
    fn test_invalid_ordering_changes_nothing() {
        let mut chem = negafibnary();
        let before: Vec<String> = chem.elements().iter().map(|e| e.name().to_string()).collect();
        let err = chem.order_elements_named("atomic weight", false, true).unwrap_err();
        assert!(matches!(err, LookAndSayError::InvalidOrdering(ref s) if s == "atomic weight"));
        let after: Vec<String> = chem.elements().iter().map(|e| e.name().to_string()).collect();
        assert_eq!(before, after);
        assert!(chem.order_elements_named("string length", false, true).is_ok());
    }

    #[test]
    fn test_renaming() {
        let mut chem = Chemistry::binary(LookAndSay::binary());
        chem.generate_elements(&["1"]).unwrap();
        chem.order_elements_by_key(|e| std::cmp::Reverse(e.string().len()), false, false);
        assert_eq!(chem.elements()[0].string(), "111100");
        assert_eq!(chem.elements()[0].name(), "E10");
        chem.order_elements(ElementOrder::Name, false, true).unwrap();
        assert_eq!(chem.elements()[0].name(), "E1");
        assert_eq!(chem.elements()[0].string(), "1");
    }

    #[test]
    fn test_conway_names_survive_ordering() {
        let mut chem = conway_from_nine();
        chem.order_elements(ElementOrder::StringLength, false, true).unwrap();
        assert_eq!(chem.elements()[0].name(), "U");
        assert_eq!(chem.element("22").unwrap().name(), "H");
    }

    #[test]
    fn test_discovery_limits() {
        let mut chem = negafibnary().with_limits(DiscoveryLimits {
            max_elements: 1,
            ..DiscoveryLimits::default()
        });
        let err = chem.generate_elements(&["0"]).unwrap_err();
        assert!(matches!(err, LookAndSayError::TooManyElements(1)));
        assert_eq!(chem.len(), 2);

        let never_split = SplitFactory::new().build();
        let mut runaway = Chemistry::new(LookAndSay::standard(), never_split).with_limits(DiscoveryLimits {
            max_chunk_len: 50,
            ..DiscoveryLimits::default()
        });
        assert!(matches!(
            runaway.generate_elements(&["1"]),
            Err(LookAndSayError::ChunkTooLong(50))
        ));
        assert!(runaway.is_empty());
    }

    #[test]
    fn test_unsayable_seed_fails() {
        let mut chem = Chemistry::binary(LookAndSay::negafibnary());
        assert!(matches!(
            chem.generate_elements(&["0000000000"]),
            Err(LookAndSayError::UnsayableRun { count: 10, .. })
        ));
    }

    #[test]
    fn test_empty_seed_is_skipped() {
        let mut chem = Chemistry::conway();
        chem.generate_elements(&[""]).unwrap();
        assert!(chem.is_empty());
    }

    #[test]
    fn test_element_order_parsing() {
        for order in [
            ElementOrder::Abundance,
            ElementOrder::Name,
            ElementOrder::String,
            ElementOrder::StringLength,
        ] {
            assert_eq!(order.as_str().parse::<ElementOrder>().unwrap(), order);
        }
        assert!("mass".parse::<ElementOrder>().is_err());
    }

    #[test]
    fn test_chemistry_for_rule() {
        assert!(Chemistry::for_rule("decimal").unwrap().look_and_say().is_conway());
        let mut chem = Chemistry::for_rule("negafibnary").unwrap();
        chem.generate_elements(&["0"]).unwrap();
        assert_eq!(chem.len(), 2);
        assert!(Chemistry::for_rule("binary").is_some());
        for name in ["roman", "say-again", "look-knave", "hex"] {
            assert!(Chemistry::for_rule(name).is_none(), "{name}");
        }
    }

    #[test]
    fn test_limits_serialize() {
        let value = serde_json::to_value(DiscoveryLimits::default()).unwrap();
        assert_eq!(value["max_elements"], 100_000);
        assert_eq!(value["max_chunk_len"], 4_096);
        assert_eq!(serde_json::to_value(ElementOrder::StringLength).unwrap(), "StringLength");
    }
}
