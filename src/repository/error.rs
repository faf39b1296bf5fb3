//! Repository error types.

use thiserror::Error;

use crate::store::StoreError;

/// User-correctable input problems. The stored document is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fill all fields.")]
    MissingRouteFields,

    #[error("That Route ID exists.")]
    DuplicateRouteId(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Stop name required.")]
    MissingStopName,

    #[error("Stop index {index} is out of range (route has {len} stops)")]
    StopIndexOutOfRange { index: usize, len: usize },

    #[error("Fill all required fields.")]
    MissingBusFields,

    #[error("Bus number already exists.")]
    DuplicateBusNumber(String),

    #[error("Select an update type.")]
    MissingUpdateType,

    #[error("Choose a stop.")]
    MissingStop,
}

/// Errors returned by repository operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RepositoryError {
    /// The validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            RepositoryError::Validation(e) => Some(e),
            RepositoryError::Storage(_) => None,
        }
    }
}
