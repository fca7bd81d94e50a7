use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Natural-key collision with an active row, re-signaled from the
    /// persistence unique-constraint violation.
    #[error("{0} already exists")]
    Duplicate(&'static str),
    /// Any other persistence failure, passed through opaque.
    #[error("database error: {0}")]
    Db(String),
}
