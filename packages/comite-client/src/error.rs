//! Error taxonomy for the client engine.
//!
//! Nothing here is fatal: every variant leaves the user in an interactive
//! state. Validation never produces an error value on its own; it returns
//! verdicts that [`SubmitError::Validation`] carries to the caller.

use comite_api::ApiError;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Failure of a directory call, normalized from whatever transport is used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("not found")]
    NotFound,

    /// Non-2xx answer or transport failure.
    #[error("{0}")]
    Remote(String),
}

impl From<ApiError> for DirectoryError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound { .. } => DirectoryError::NotFound,
            other => DirectoryError::Remote(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("la cédula debe tener 11 dígitos")]
    InvalidFormat,

    #[error("la cédula no existe, regístrese primero")]
    NotFound,

    #[error("error al iniciar sesión: {0}")]
    Remote(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{} campo(s) con errores", .0.len())]
    Validation(FieldErrors),

    #[error("error al guardar: {0}")]
    Remote(String),
}

impl From<DirectoryError> for SubmitError {
    fn from(err: DirectoryError) -> Self {
        SubmitError::Remote(err.to_string())
    }
}

/// Durable storage backend failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The persisted value could not be parsed back into a session.
    #[error("corrupt persisted session: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_not_found_maps_to_not_found() {
        let err: DirectoryError = ApiError::NotFound {
            path: "Members/byCedula/1".into(),
        }
        .into();
        assert_eq!(err, DirectoryError::NotFound);
    }

    #[test]
    fn test_api_status_maps_to_remote_with_message() {
        let err: DirectoryError = ApiError::Api {
            status: 500,
            message: "boom".into(),
        }
        .into();
        match err {
            DirectoryError::Remote(msg) => assert!(msg.contains("500")),
            other => panic!("expected Remote, got {:?}", other),
        }
    }
}
