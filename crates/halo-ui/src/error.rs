use std::fmt;

/// A ring name that is neither `inner`, `middle`, `outer` nor `0..=2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingIndexError {
    pub input: String,
}

impl fmt::Display for RingIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown ring `{}` (expected inner, middle, outer or 0..=2)",
            self.input
        )
    }
}

impl std::error::Error for RingIndexError {}
