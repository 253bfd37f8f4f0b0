//! Cart store errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use super::mapper::CartMapError;

#[derive(Debug, Error)]
pub enum CartStoreError {
    /// A persisted row violated a mapping invariant. This means corrupted
    /// stored state and is never silently tolerated.
    #[error("corrupted cart state")]
    Corrupt(#[from] CartMapError),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartStoreError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
