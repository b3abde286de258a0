use thiserror::Error;

/// Errors raised while configuring a [`ChainedMap`](crate::ChainedMap).
///
/// Lookups and deletes of absent keys are not errors; they are reported
/// through `Option` and `bool` return values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The table needs at least one bucket to compute an index.
    #[error("bucket count must be at least 1, got {0}")]
    InvalidBucketCount(usize),

    /// The growth threshold must be a positive, finite ratio.
    #[error("max load factor must be positive and finite, got {0}")]
    InvalidLoadFactor(f64),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            Error::InvalidBucketCount(0).to_string(),
            "bucket count must be at least 1, got 0"
        );
        assert!(Error::InvalidLoadFactor(-1.5).to_string().contains("-1.5"));
    }
}
