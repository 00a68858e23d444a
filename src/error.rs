use std::fmt;
use std::io;
use std::path::PathBuf;

/// Why a save file could not be read or applied.
#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    MissingLine { label: &'static str },
    UnexpectedLabel { expected: &'static str, found: String },
    MissingField { label: &'static str },
    InvalidNumber { label: &'static str, value: String },
    LivesOutOfRange { label: &'static str, value: i32 },
    TrailingData { line: String },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "save file i/o: {e}"),
            Self::MissingLine { label } => write!(f, "save file ends before `{label}`"),
            Self::UnexpectedLabel { expected, found } => {
                write!(f, "expected `{expected}`, found `{found}`")
            }
            Self::MissingField { label } => write!(f, "`{label}` line is missing a value"),
            Self::InvalidNumber { label, value } => {
                write!(f, "`{label}` has a malformed number: `{value}`")
            }
            Self::LivesOutOfRange { label, value } => {
                write!(f, "`{label}` out of range: {value} (allowed -1..=2)")
            }
            Self::TrailingData { line } => write!(f, "unexpected trailing data: `{line}`"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[derive(Debug)]
pub enum GameError {
    /// A sprite or background bitmap is missing or unreadable.
    AssetLoad { path: PathBuf, reason: String },
    /// A save file is malformed or unreadable; the world was left untouched.
    Persistence(PersistenceError),
    /// The world is not in the shape an operation needs.
    InvariantViolation { what: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { path, reason } => {
                write!(f, "failed to load asset {}: {reason}", path.display())
            }
            Self::Persistence(e) => write!(f, "persistence error: {e}"),
            Self::InvariantViolation { what } => write!(f, "invariant violation: {what}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PersistenceError> for GameError {
    fn from(e: PersistenceError) -> Self {
        Self::Persistence(e)
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
