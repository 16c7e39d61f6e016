use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("employee {0} not found")]
    NotFound(i64),
    #[error("employee with id {0} already exists")]
    DuplicateKey(i64),
    #[error("store error: {0}")]
    Store(#[from] DbErr),
}

impl HrError {
    /// Stable machine-readable code, for views and logs.
    pub fn code(&self) -> &'static str {
        match self {
            HrError::NotFound(_) => "NOT_FOUND",
            HrError::DuplicateKey(_) => "DUPLICATE_KEY",
            HrError::Store(_) => "STORE",
        }
    }
}

/// Log a backend failure and wrap it. Every store path funnels through here
/// so nothing reaches the caller unlogged.
pub(crate) fn store_error(op: &'static str, err: DbErr) -> HrError {
    error!(op, error = %err, "employee store operation failed");
    HrError::Store(err)
}

/// Like [`store_error`] but recognises a primary-key collision on insert.
pub(crate) fn insert_error(id: i64, err: DbErr) -> HrError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!(id, %detail, "duplicate employee id rejected");
            HrError::DuplicateKey(id)
        }
        _ => store_error("insert", err),
    }
}
