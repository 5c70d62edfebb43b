//! Runner error types.

use thiserror::Error;

/// Errors that can occur while orchestrating an assignment run.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("roster store error: {0}")]
    Store(#[from] rota_state::StoreError),
}

pub type RunnerResult<T> = Result<T, RunnerError>;
