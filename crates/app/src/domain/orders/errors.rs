//! Order history errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use super::mapper::OrdersMapError;

#[derive(Debug, Error)]
pub enum OrdersStoreError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("corrupted order state")]
    Corrupt(#[from] OrdersMapError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersStoreError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
