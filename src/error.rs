// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the data layer and the application shell.
//!
//! Every gateway operation is total: it returns `Result<_, DataError>` and
//! never unwinds past its own boundary. The `kind` tag keeps "not found"
//! distinguishable from a transport failure, so callers that care can branch
//! on it instead of guessing from an empty collection.

use std::fmt;

/// Classification of a data-layer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote round-trip itself failed (network, HTTP status, bad envelope).
    Transport,
    /// The store accepted the request but refused it (authorization rules,
    /// referential checks, store-side validation).
    Rejected,
    /// Local input validation failed before the request was sent.
    Validation,
    /// The addressed entity does not exist.
    NotFound,
    /// A mutation was attempted without an authenticated session.
    Unauthorized,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Rejected => "rejected",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
        };
        f.write_str(name)
    }
}

/// A data-layer error: a kind tag plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DataError {
    pub kind: ErrorKind,
    pub message: String,
}

impl DataError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Rejected, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized, "authentication required")
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Application-level error for the binary and the seeding routine.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Seeding aborted after {created} parks: {source}")]
    Seed { created: usize, source: DataError },
}

/// Result type alias for application code.
pub type Result<T> = std::result::Result<T, AppError>;
