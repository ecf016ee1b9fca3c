//! Errors raised while saying, splitting and analysing look-and-say strings

/// Everything that can go wrong in this crate
#[derive(Debug, thiserror::Error)]
pub enum LookAndSayError {
    #[error("Say rule cannot describe a run of {count} x '{ch}'")]
    UnsayableRun { count: usize, ch: char },

    #[error("Sequence has {0} term(s); at least 2 are needed to compute length ratios")]
    TooFewTerms(usize),

    #[error("Chemistry has no elements; generate elements before analysing it")]
    NoElements,

    #[error("Element discovery exceeded the limit of {0} elements")]
    TooManyElements(usize),

    #[error("Element discovery produced a chunk longer than {0} characters")]
    ChunkTooLong(usize),

    #[error("Invalid ordering criterion '{0}'. Valid criteria are 'abundance', 'name', 'string', and 'string length'")]
    InvalidOrdering(String),

    #[error("Eigen decomposition of the decay matrix did not converge")]
    EigenDecomposition,

    #[error("Characteristic polynomial coefficient overflowed 128 bits")]
    PolynomialOverflow,

    #[error("'{string}' did not settle within {days} days")]
    DayLimitExceeded { string: String, days: usize },
}

pub type Result<T> = std::result::Result<T, LookAndSayError>;
