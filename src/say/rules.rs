//! Named say rules

use super::{LookAndSay, SayRule};

impl LookAndSay {
    /// Conway's standard decimal look-and-say
    pub fn standard() -> Self {
        let mut las = Self::new(SayRule::count_only(|count| count.to_string()));
        las.conway = true;
        las
    }

    /// Counts written in base two
    pub fn binary() -> Self {
        Self::new(SayRule::count_only(|count| format!("{count:b}")))
    }

    /// Counts written in base negative Fibonacci, up to eight
    pub fn negafibnary() -> Self {
        Self::new(SayRule::try_count_only(|count| {
            let word = match count {
                1 => "1",
                2 => "100",
                3 => "101",
                4 => "10010",
                5 => "10000",
                6 => "10001",
                7 => "10100",
                8 => "10101",
                _ => return None,
            };
            Some(word.to_string())
        }))
    }

    /// Counts written as Roman numerals, up to nine
    pub fn roman() -> Self {
        const NUMERALS: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];
        Self::new(SayRule::try_count_only(|count| {
            count
                .checked_sub(1)
                .and_then(|i| NUMERALS.get(i))
                .map(|numeral| numeral.to_string())
        }))
    }

    /// Look-and-say-again: every run is stuttered, `a^b -> bbaa`
    pub fn say_again() -> Self {
        Self::new(SayRule::count_and_char(|count, ch| format!("{count}{count}{ch}{ch}")))
    }

    /// Morrill's look knave: binary count followed by the flipped bit
    pub fn look_knave() -> Self {
        Self::new(SayRule::try_count_and_char(|count, bit| {
            let flipped = match bit {
                '0' => '1',
                '1' => '0',
                _ => return None,
            };
            Some(format!("{count:b}{flipped}"))
        }))
    }

    /// Look up a named rule: `decimal`, `binary`, `negafibnary`, `roman`,
    /// `say-again` or `look-knave`
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "decimal" | "standard" | "conway" => Some(Self::standard()),
            "binary" => Some(Self::binary()),
            "negafibnary" => Some(Self::negafibnary()),
            "roman" => Some(Self::roman()),
            "say-again" => Some(Self::say_again()),
            "look-knave" => Some(Self::look_knave()),
            _ => None,
        }
    }
}
