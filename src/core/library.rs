use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // Raised when no copy of a book is left to lend. It is only retryable when a
    // concurrent checkout won the last copy after this caller's checks passed.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    BorrowLimitExceeded {
        message: String,
        limit: i64,
    },
    AlreadyReturned {
        message: String,
    },
    Serialization {
        message: String,
    },
    // A broken ledger/catalog invariant. This is a bug in the core and must not
    // be handled as a caller mistake.
    Internal {
        message: String,
    },
}

impl LibraryError {
    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn borrow_limit_exceeded(message: &str, limit: i64) -> LibraryError {
        LibraryError::BorrowLimitExceeded { message: message.to_string(), limit }
    }

    pub fn already_returned(message: &str) -> LibraryError {
        LibraryError::AlreadyReturned { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn internal(message: &str) -> LibraryError {
        LibraryError::Internal { message: message.to_string() }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::NotFound { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::Validation { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::BorrowLimitExceeded { .. } => { false }
            LibraryError::AlreadyReturned { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Internal { .. } => { false }
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, LibraryError::Internal { .. })
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::BorrowLimitExceeded { message, limit } => {
                write!(f, "{} (limit {})", message, limit)
            }
            LibraryError::AlreadyReturned { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Internal { message } => {
                write!(f, "internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog and ledger operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum CheckoutStatus {
    Active,
    Returned,
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CheckoutStatus::Active => write!(f, "Active"),
            CheckoutStatus::Returned => write!(f, "Returned"),
        }
    }
}
