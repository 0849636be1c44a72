use std::fmt;

use shared::protocol::MAX_RESULTS_PER_REQUEST;

use crate::error::BatchSizeError;

pub const MIN_BATCH_SIZE: i64 = 1;
pub const MAX_BATCH_SIZE: i64 = MAX_RESULTS_PER_REQUEST as i64;
pub const DEFAULT_BATCH_SIZE: u32 = 5;

/// Number of profiles requested per fetch, always within `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSize(u32);

impl BatchSize {
    pub fn new(value: i64) -> Result<Self, BatchSizeError> {
        if (MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(BatchSizeError::OutOfRange { value })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_BATCH_SIZE)
    }
}

impl From<BatchSize> for i64 {
    fn from(value: BatchSize) -> Self {
        i64::from(value.0)
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_inclusive_bounds() {
        assert_eq!(BatchSize::new(1).map(BatchSize::get), Ok(1));
        assert_eq!(BatchSize::new(100).map(BatchSize::get), Ok(100));
    }

    #[test]
    fn rejects_values_outside_bounds() {
        for value in [0, -1, 101, i64::MAX, i64::MIN] {
            assert_eq!(
                BatchSize::new(value),
                Err(BatchSizeError::OutOfRange { value })
            );
        }
    }

    #[test]
    fn out_of_range_message_names_the_bounds() {
        let err = BatchSize::new(101).expect_err("out of range");
        assert_eq!(
            err.to_string(),
            "batch size must be between 1 and 100 (got 101)"
        );
    }
}
