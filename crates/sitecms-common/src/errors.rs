//! Error types for the sitecms system

use std::fmt;

use thiserror::Error;

/// Why a document could not be read.
///
/// Callers only ever see [`ErrorKind::ReadError`]; the cause is kept for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    /// The primary file does not exist
    Missing,
    /// The file exists but could not be read
    Io,
    /// The file was read but is not valid JSON
    InvalidJson,
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailure::Missing => f.write_str("file is missing"),
            ReadFailure::Io => f.write_str("file could not be read"),
            ReadFailure::InvalidJson => f.write_str("file is not valid JSON"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Access denied to file: {0}")]
    AccessDenied(String),

    #[error("Error reading file {name}: {cause}")]
    Read {
        name: String,
        cause: ReadFailure,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error writing file {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The failure kinds reported to callers of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AccessDenied,
    ReadError,
    WriteError,
    Other,
}

impl Error {
    pub fn read(
        name: impl Into<String>,
        cause: ReadFailure,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Read {
            name: name.into(),
            cause,
            source: Box::new(source),
        }
    }

    pub fn write(name: impl Into<String>, source: std::io::Error) -> Self {
        Error::Write {
            name: name.into(),
            source,
        }
    }

    pub fn read_failure(&self) -> Option<ReadFailure> {
        match self {
            Error::Read { cause, .. } => Some(*cause),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AccessDenied(_) => ErrorKind::AccessDenied,
            Error::Read { .. } => ErrorKind::ReadError,
            Error::Write { .. } => ErrorKind::WriteError,
            Error::Config(_) | Error::Json(_) => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
