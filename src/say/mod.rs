//! Say-what-you-see — the run-length step behind every look-and-say sequence
//!
//! A string is read as maximal runs `a^b` (the character `a` repeated `b`
//! times). A [`SayRule`] decides what each run is spoken as, and the spoken
//! runs are concatenated to form the next term.

mod rules;

use crate::error::{LookAndSayError, Result};
use log::debug;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stable identity of a say rule.
///
/// Elements of a chemistry are identified by their string together with the
/// rule that produced them, so equal strings under different rules never
/// compare equal. Cloning a [`LookAndSay`] keeps its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u64);

impl RuleId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

type CountFn = dyn Fn(usize) -> Option<String> + Send + Sync;
type CountAndCharFn = dyn Fn(usize, char) -> Option<String> + Send + Sync;

/// How a run `a^b` is spoken. The arity is chosen once, at construction.
#[derive(Clone)]
pub enum SayRule {
    /// `a^b -> say(b) a`
    CountOnly(Arc<CountFn>),
    /// `a^b -> say(b, a)`
    CountAndChar(Arc<CountAndCharFn>),
}

impl SayRule {
    pub fn count_only<F>(say: F) -> Self
    where
        F: Fn(usize) -> String + Send + Sync + 'static,
    {
        Self::CountOnly(Arc::new(move |count| Some(say(count))))
    }

    /// A count-only rule that may decline some counts by returning `None`
    pub fn try_count_only<F>(say: F) -> Self
    where
        F: Fn(usize) -> Option<String> + Send + Sync + 'static,
    {
        Self::CountOnly(Arc::new(say))
    }

    pub fn count_and_char<F>(say: F) -> Self
    where
        F: Fn(usize, char) -> String + Send + Sync + 'static,
    {
        Self::CountAndChar(Arc::new(move |count, ch| Some(say(count, ch))))
    }

    /// A two-argument rule that may decline some runs by returning `None`
    pub fn try_count_and_char<F>(say: F) -> Self
    where
        F: Fn(usize, char) -> Option<String> + Send + Sync + 'static,
    {
        Self::CountAndChar(Arc::new(say))
    }

    /// Speak a single run
    pub fn speak(&self, count: usize, ch: char) -> Result<String> {
        let word = match self {
            SayRule::CountOnly(say) => say(count).map(|mut word| {
                word.push(ch);
                word
            }),
            SayRule::CountAndChar(say) => say(count, ch),
        };
        word.ok_or(LookAndSayError::UnsayableRun { count, ch })
    }
}

impl fmt::Debug for SayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SayRule::CountOnly(_) => f.write_str("SayRule::CountOnly"),
            SayRule::CountAndChar(_) => f.write_str("SayRule::CountAndChar"),
        }
    }
}

/// Generator of look-and-say sequences for one say rule
#[derive(Debug, Clone)]
pub struct LookAndSay {
    rule: SayRule,
    id: RuleId,
    /// Standard decimal rule, named with Conway's periodic table
    conway: bool,
    sequence: Vec<String>,
}

impl LookAndSay {
    pub fn new(rule: SayRule) -> Self {
        Self {
            rule,
            id: RuleId::next(),
            conway: false,
            sequence: Vec::new(),
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn rule(&self) -> &SayRule {
        &self.rule
    }

    /// Whether this is Conway's standard decimal rule
    pub fn is_conway(&self) -> bool {
        self.conway
    }

    /// The most recently generated sequence
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    /// The fundamental operation: `'1112222333'` becomes `'314233'` under the
    /// standard rule. The empty string says nothing and yields `""`.
    pub fn say_what_you_see(&self, string: &str) -> Result<String> {
        let mut result = String::new();
        let mut chars = string.chars();
        let Some(mut letter) = chars.next() else {
            return Ok(result);
        };
        let mut count = 1;
        for ch in chars {
            if ch == letter {
                count += 1;
            } else {
                result.push_str(&self.rule.speak(count, letter)?);
                letter = ch;
                count = 1;
            }
        }
        result.push_str(&self.rule.speak(count, letter)?);
        Ok(result)
    }

    /// Generate `terms` terms starting at `seed`.
    ///
    /// An empty seed leaves the sequence empty and returns an empty slice.
    pub fn generate_sequence(&mut self, seed: &str, terms: usize) -> Result<&[String]> {
        self.sequence.clear();
        if seed.is_empty() {
            return Ok(&self.sequence);
        }
        let mut sequence = Vec::with_capacity(terms);
        let mut current = seed.to_string();
        for i in 0..terms {
            if i > 0 {
                current = self.say_what_you_see(&current)?;
            }
            sequence.push(current.clone());
        }
        debug!(
            "Generated {} terms from seed '{}' (last term has length {})",
            sequence.len(),
            seed,
            sequence.last().map_or(0, String::len)
        );
        self.sequence = sequence;
        Ok(&self.sequence)
    }

    /// Ratios of the lengths of successive terms
    pub fn length_ratios(&self) -> Result<Vec<f64>> {
        if self.sequence.len() < 2 {
            return Err(LookAndSayError::TooFewTerms(self.sequence.len()));
        }
        Ok(self
            .sequence
            .windows(2)
            .map(|pair| pair[1].chars().count() as f64 / pair[0].chars().count() as f64)
            .collect())
    }

    /// Ratio of the lengths of the last two terms
    pub fn last_length_ratio(&self) -> Result<f64> {
        let ratios = self.length_ratios()?;
        ratios
            .last()
            .copied()
            .ok_or(LookAndSayError::TooFewTerms(self.sequence.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_say_what_you_see_decimal() {
        let decimal = LookAndSay::standard();
        assert_eq!(decimal.say_what_you_see("11133222200").unwrap(), "31234220");
        assert_eq!(decimal.say_what_you_see("1112222333").unwrap(), "314233");
    }

    #[test]
    fn test_empty_string_says_nothing() {
        let decimal = LookAndSay::standard();
        assert_eq!(decimal.say_what_you_see("").unwrap(), "");
    }

    #[test]
    fn test_decimal_sequence() {
        let mut decimal = LookAndSay::standard();
        let seq = decimal.generate_sequence("1", 6).unwrap().to_vec();
        assert_eq!(seq, vec!["1", "11", "21", "1211", "111221", "312211"]);
        assert_eq!(decimal.length_ratios().unwrap(), vec![2.0, 1.0, 2.0, 1.5, 1.0]);
        assert_eq!(decimal.last_length_ratio().unwrap(), 1.0);
    }

    #[test]
    fn test_empty_seed_gives_empty_sequence() {
        let mut decimal = LookAndSay::standard();
        decimal.generate_sequence("1", 3).unwrap();
        assert!(decimal.generate_sequence("", 5).unwrap().is_empty());
        assert!(decimal.sequence().is_empty());
    }

    #[test]
    fn test_ratios_need_two_terms() {
        let mut decimal = LookAndSay::standard();
        decimal.generate_sequence("1", 1).unwrap();
        assert!(matches!(
            decimal.length_ratios(),
            Err(LookAndSayError::TooFewTerms(1))
        ));
        assert!(decimal.last_length_ratio().is_err());
    }

    #[test]
    fn test_binary_sequence() {
        let mut binary = LookAndSay::binary();
        assert_eq!(binary.say_what_you_see("111100011").unwrap(), "1001110101");
        let seq = binary.generate_sequence("1", 5).unwrap().to_vec();
        assert_eq!(seq, vec!["1", "11", "101", "111011", "11110101"]);
        let ratios = binary.length_ratios().unwrap();
        assert_eq!(ratios[..3], [2.0, 1.5, 2.0]);
        assert!((binary.last_length_ratio().unwrap() - 1.333).abs() < 1e-3);
    }

    #[test]
    fn test_two_argument_rule() {
        let mut stutter_echo =
            LookAndSay::new(SayRule::count_and_char(|n, c| n.to_string().repeat(3) + &c.to_string().repeat(2)));
        assert_eq!(stutter_echo.say_what_you_see("112220").unwrap(), "222113332211100");
        let seq = stutter_echo.generate_sequence("2", 4).unwrap().to_vec();
        assert_eq!(seq, vec!["2", "11122", "3331122222", "333332221155522"]);
        assert_eq!(stutter_echo.length_ratios().unwrap(), vec![5.0, 2.0, 1.5]);
    }

    #[test]
    fn test_declined_run_propagates() {
        let negafibnary = LookAndSay::negafibnary();
        assert!(matches!(
            negafibnary.say_what_you_see("000000000"),
            Err(LookAndSayError::UnsayableRun { count: 9, ch: '0' })
        ));

        let strict = LookAndSay::new(SayRule::try_count_and_char(|n, c| {
            (c != 'x').then(|| format!("{n}{c}"))
        }));
        assert_eq!(strict.say_what_you_see("aab").unwrap(), "2a1b");
        assert!(strict.say_what_you_see("axx").is_err());
    }

    #[test]
    fn test_rule_identity() {
        let a = LookAndSay::standard();
        let b = LookAndSay::standard();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }
}
