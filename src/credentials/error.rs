//! Error types for the credential core.

use std::fmt;
use thiserror::Error;

/// Failures raised by a [`UserStore`](super::store::UserStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    #[error("account not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Failures raised by the [`CredentialService`](super::service::CredentialService).
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("missing required field")]
    MissingField,

    #[error("password does not satisfy the password policy")]
    WeakPassword,

    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

/// Stable, machine-readable classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    WeakPassword,
    UsernameTaken,
    InvalidCredentials,
    NotFound,
    DuplicateUsername,
    StoreError,
    InternalError,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "MissingField",
            Self::WeakPassword => "WeakPassword",
            Self::UsernameTaken => "UsernameTaken",
            Self::InvalidCredentials => "InvalidCredentials",
            Self::NotFound => "NotFound",
            Self::DuplicateUsername => "DuplicateUsername",
            Self::StoreError => "StoreError",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateUsername(_) => ErrorKind::DuplicateUsername,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::StoreError,
        }
    }
}

impl CredentialError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField => ErrorKind::MissingField,
            Self::WeakPassword => ErrorKind::WeakPassword,
            Self::UsernameTaken => ErrorKind::UsernameTaken,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::Store(err) => err.kind(),
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }
}

/// True when the database rejected a write because of a UNIQUE constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
