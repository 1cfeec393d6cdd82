use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    // Input that failed validation, e.g. a non-numeric quantity. The caller
    // recovers by asking for the value again.
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
    // The store exists but its content is not a catalog.
    CorruptData {
        message: String,
    },
    Io {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn corrupt_data(message: &str) -> LibraryError {
        LibraryError::CorruptData { message: message.to_string() }
    }

    pub fn io(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Io { message: message.to_string(), reason_code }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::io(
            format!("io failure {}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::corrupt_data(
            format!("json parsing {}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CorruptData { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Io { message, reason_code } => {
                match reason_code {
                    Some(reason) => write!(f, "{} ({})", message, reason),
                    None => write!(f, "{}", message),
                }
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Field of an existing book that an update overwrites.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BookField {
    Author,
    Genre,
    Quantity,
}

impl BookField {
    // menu numbering used by the update submenu
    pub fn from_choice(choice: &str) -> Option<BookField> {
        match choice.trim() {
            "1" => Some(BookField::Author),
            "2" => Some(BookField::Genre),
            "3" => Some(BookField::Quantity),
            _ => None,
        }
    }
}

impl Display for BookField {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookField::Author => write!(f, "Author"),
            BookField::Genre => write!(f, "Genre"),
            BookField::Quantity => write!(f, "Quantity"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum SearchKind {
    Author,
    Genre,
}

impl TryFrom<&str> for SearchKind {
    type Error = LibraryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "author" | "автор" => Ok(SearchKind::Author),
            "genre" | "жанр" => Ok(SearchKind::Genre),
            other => Err(LibraryError::validation(
                format!("unknown search kind '{}', expected author or genre", other).as_str(),
                Some("search_kind".to_string()))),
        }
    }
}

impl Display for SearchKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SearchKind::Author => write!(f, "Author"),
            SearchKind::Genre => write!(f, "Genre"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum StatsKind {
    TotalBooks,
    TotalCopies,
    ByGenre,
    ByAuthor,
}

impl StatsKind {
    pub fn from_choice(choice: &str) -> Option<StatsKind> {
        match choice.trim() {
            "1" => Some(StatsKind::TotalBooks),
            "2" => Some(StatsKind::TotalCopies),
            "3" => Some(StatsKind::ByGenre),
            "4" => Some(StatsKind::ByAuthor),
            _ => None,
        }
    }
}

impl Display for StatsKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StatsKind::TotalBooks => write!(f, "TotalBooks"),
            StatsKind::TotalCopies => write!(f, "TotalCopies"),
            StatsKind::ByGenre => write!(f, "ByGenre"),
            StatsKind::ByAuthor => write!(f, "ByAuthor"),
        }
    }
}

/// Result of reading the store.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum LoadStatus {
    Loaded,
    // the store did not exist yet and an empty catalog took its place
    CreatedNew,
}

impl Display for LoadStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoadStatus::Loaded => write!(f, "Loaded"),
            LoadStatus::CreatedNew => write!(f, "CreatedNew"),
        }
    }
}
