use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    CorruptData {
        message: String,
    },
    Io {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&mut self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::CorruptData { message } => {
                CommandError::CorruptData { message }
            }
            LibraryError::Io { message, reason_code } => {
                CommandError::Io { message, reason_code }
            }
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Validation { message, .. } => {
                write!(f, "invalid input: {}", message)
            }
            CommandError::NotFound { message } => {
                write!(f, "not found: {}", message)
            }
            CommandError::DuplicateKey { message } => {
                write!(f, "already exists: {}", message)
            }
            CommandError::CorruptData { message } => {
                write!(f, "corrupt data: {}", message)
            }
            CommandError::Io { message, reason_code } => {
                match reason_code {
                    Some(reason) => write!(f, "io error: {} ({})", message, reason),
                    None => write!(f, "io error: {}", message),
                }
            }
        }
    }
}
