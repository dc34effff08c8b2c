use thiserror::Error;

/// Errors raised by the document store layer.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other driver failure; the message is the driver's own.
    #[error("{0}")]
    Operation(String),
}

impl From<mongodb::error::Error> for DbError {
    fn from(error: mongodb::error::Error) -> Self {
        DbError::Operation(error.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
