use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug, PartialEq)]
pub enum CommandError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Unavailable {
        message: String,
        retryable: bool,
    },
    LimitExceeded {
        message: String,
        limit: i64,
    },
    Conflict {
        message: String,
    },
    Serialization {
        message: String,
    },
    Internal {
        message: String,
    },
}

impl CommandError {
    // Everything but an internal error can be reported back to the user and re-prompted.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CommandError::Internal { .. })
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::CurrentlyUnavailable { message, retryable, .. } => {
                CommandError::Unavailable { message, retryable }
            }
            LibraryError::BorrowLimitExceeded { message, limit } => {
                CommandError::LimitExceeded { message, limit }
            }
            LibraryError::AlreadyReturned { message } => {
                CommandError::Conflict { message }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Internal { message } => {
                CommandError::Internal { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_library_errors() {
        assert!(matches!(CommandError::from(LibraryError::not_found("test")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("test")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::validation("test", None)), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::unavailable("test", None, true)), CommandError::Unavailable { retryable: true, .. }));
        assert!(matches!(CommandError::from(LibraryError::borrow_limit_exceeded("test", 3)), CommandError::LimitExceeded { limit: 3, .. }));
        assert!(matches!(CommandError::from(LibraryError::already_returned("test")), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::internal("test")), CommandError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_should_report_recoverable() {
        assert!(CommandError::from(LibraryError::already_returned("test")).is_recoverable());
        assert!(!CommandError::from(LibraryError::internal("test")).is_recoverable());
    }
}
