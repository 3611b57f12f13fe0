//! Member errors.

use thiserror::Error;

/// Failure of a point-balance mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointsError {
    #[error("member not found")]
    NotFound,

    #[error("point balance {available} is below the required {required}")]
    Insufficient { required: u64, available: u64 },
}
