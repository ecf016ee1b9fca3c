//! Composable splitting rules
//!
//! A [`SplitFactory`] collects reasons for `LR` to split as `L.R`:
//!
//! * explicit pairs `(l, r)` where `L` ends with `l` and `R` starts with `r`
//! * chunks `l` that split from anything after them
//! * chunks `r` that split from anything before them
//! * arbitrary predicates on `(L, R)`
//!
//! Any single reason is enough, except that a boundary between two equal
//! characters is never taken: runs stay whole whatever the predicates say.

use super::SplitRule;
use std::fmt;
use std::sync::Arc;

/// Extra boundary predicate `is_split(L, R)`
pub type SplitCondition = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct SplitFactory {
    splitting_pairs: Vec<(String, String)>,
    split_after: Vec<String>,
    split_before: Vec<String>,
    conditions: Vec<SplitCondition>,
}

impl SplitFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `(l, r)` such that `lr` always splits as `l.r`
    pub fn declare_splitting_pairs<I, L, R>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<String>,
        R: Into<String>,
    {
        self.splitting_pairs
            .extend(pairs.into_iter().map(|(l, r)| (l.into(), r.into())));
        self
    }

    /// Chunks `l` such that `lR` splits for every `R`
    pub fn split_after<I, S>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.split_after.extend(chunks.into_iter().map(Into::into));
        self
    }

    /// Chunks `r` such that `Lr` splits for every `L`
    pub fn split_before<I, S>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.split_before.extend(chunks.into_iter().map(Into::into));
        self
    }

    /// A predicate that returns `true` for some splittable pairs `(L, R)`
    pub fn add_splitting_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(Arc::new(condition));
        self
    }

    pub fn build(self) -> SplitRule {
        SplitRule::Factory(self)
    }

    /// Boundary predicate combining every registered reason
    pub fn is_split(&self, left: &str, right: &str) -> bool {
        let (Some(last), Some(first)) = (left.chars().next_back(), right.chars().next()) else {
            return true;
        };
        if last == first {
            return false;
        }
        self.split_after.iter().any(|l| left.ends_with(l.as_str()))
            || self.split_before.iter().any(|r| right.starts_with(r.as_str()))
            || self
                .splitting_pairs
                .iter()
                .any(|(l, r)| left.ends_with(l.as_str()) && right.starts_with(r.as_str()))
            || self.conditions.iter().any(|condition| condition(left, right))
    }
}

impl fmt::Debug for SplitFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitFactory")
            .field("splitting_pairs", &self.splitting_pairs)
            .field("split_after", &self.split_after)
            .field("split_before", &self.split_before)
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_after_zero() {
        let split = SplitFactory::new().split_after(["0"]).build();
        assert_eq!(
            split.split("0123400023451234076560034"),
            vec!["0", "1234000", "234512340", "765600", "34"]
        );
    }

    #[test]
    fn test_split_before_zero() {
        let split = SplitFactory::new().split_before(["0"]).build();
        assert_eq!(
            split.split("01234000234512340765600340"),
            vec!["01234", "00023451234", "07656", "0034", "0"]
        );
    }

    #[test]
    fn test_split_after_multiple() {
        let split = SplitFactory::new().split_after(["12", "44", "333"]).build();
        assert_eq!(
            split.split("012114442123400122333123441"),
            vec!["012", "11444", "212", "3400122333", "12", "344", "1"]
        );
    }

    #[test]
    fn test_split_before_multiple() {
        let split = SplitFactory::new().split_before(["12", "44", "333"]).build();
        assert_eq!(
            split.split("012114442123400122333123441"),
            vec!["0", "1211", "4442", "123400", "122", "333", "123", "441"]
        );
    }

    #[test]
    fn test_splitting_pairs() {
        let split = SplitFactory::new()
            .declare_splitting_pairs([("311", "223"), ("0", "1")])
            .build();
        assert_eq!(
            split.split("12311223323112011200011110234234"),
            vec!["12311", "2233231120", "112000", "11110234234"]
        );
    }

    #[test]
    fn test_condition_cannot_split_a_run() {
        let factory = SplitFactory::new().add_splitting_condition(|l, _| l.ends_with('a'));
        assert!(!factory.is_split("ba", "ab"));
        assert!(factory.is_split("ba", "b"));
        assert!(factory.is_split("", "b"));
        assert_eq!(factory.build().split("baab"), vec!["baa", "b"]);
    }

    #[test]
    fn test_no_reason_no_split() {
        let split = SplitFactory::new().build();
        assert_eq!(split.split("0123"), vec!["0123"]);
    }
}
