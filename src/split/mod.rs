//! Splitting strings into chunks ("atoms")
//!
//! Every rule scans the candidate boundaries left to right. A boundary
//! before position `i` is tested against the whole left side since the last
//! confirmed boundary and the whole right side up to the end of the string,
//! so predicates may look several characters past the boundary.

mod conway;
mod factory;

pub use conway::is_split_pair_conway;
pub use factory::{SplitCondition, SplitFactory};

/// A splitting rule. Concatenating the chunks always gives back the input.
#[derive(Debug, Clone, Default)]
pub enum SplitRule {
    /// Conway's Splitting Theorem for decimal strings
    #[default]
    Conway,
    /// A rule assembled by [`SplitFactory`]
    Factory(SplitFactory),
}

impl SplitRule {
    /// Split after every occurrence of any of `chunks`
    pub fn after<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SplitFactory::new().split_after(chunks).build()
    }

    /// Split before every occurrence of any of `chunks`
    pub fn before<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SplitFactory::new().split_before(chunks).build()
    }

    pub fn split(&self, string: &str) -> Vec<String> {
        match self {
            SplitRule::Conway => split_greedy(string, is_split_pair_conway),
            SplitRule::Factory(factory) => split_greedy(string, |l, r| factory.is_split(l, r)),
        }
    }
}

/// Split according to Conway's Splitting Theorem.
///
/// `split_conway("1211132213") == ["12", "1113", "22", "13"]`. The empty
/// string comes back as a single empty chunk.
pub fn split_conway(string: &str) -> Vec<String> {
    SplitRule::Conway.split(string)
}

fn split_greedy<F>(string: &str, is_split: F) -> Vec<String>
where
    F: Fn(&str, &str) -> bool,
{
    let mut chunks = Vec::new();
    let mut start = 0;
    for (i, _) in string.char_indices().skip(1) {
        if is_split(&string[start..i], &string[i..]) {
            chunks.push(string[start..i].to_string());
            start = i;
        }
    }
    chunks.push(string[start..].to_string());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 8] = [
        "1",
        "1211132213",
        "12111322138127",
        "132211132122311229",
        "0123400023451234076560034",
        "2233322211n",
        "IIIVIVIIVIIIVII",
        "ü1ü22ü333",
    ];

    #[test]
    fn test_chunks_concatenate_to_input() {
        let rules = [
            SplitRule::Conway,
            SplitRule::after(["0"]),
            SplitRule::before(["0", "V"]),
            SplitFactory::new()
                .declare_splitting_pairs([("311", "223"), ("0", "1")])
                .add_splitting_condition(|_, _| true)
                .build(),
        ];
        for rule in &rules {
            for sample in SAMPLES {
                let chunks = rule.split(sample);
                assert_eq!(chunks.concat(), sample, "{rule:?} on {sample}");
                assert!(chunks.iter().all(|c| !c.is_empty()), "{rule:?} on {sample}");
            }
        }
    }

    #[test]
    fn test_empty_string_is_one_empty_chunk() {
        assert_eq!(split_conway(""), vec![""]);
        assert_eq!(SplitRule::after(["0"]).split(""), vec![""]);
    }

    #[test]
    fn test_runs_never_split() {
        let always = SplitFactory::new().add_splitting_condition(|_, _| true).build();
        assert_eq!(always.split("aabbbc"), vec!["aa", "bbb", "c"]);
        for sample in SAMPLES {
            for chunks in [split_conway(sample), always.split(sample)] {
                for pair in chunks.windows(2) {
                    assert_ne!(pair[0].chars().last(), pair[1].chars().next());
                }
            }
        }
    }
}
