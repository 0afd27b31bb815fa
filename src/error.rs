use std::io;
use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read data")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("section not found: {section:?}")]
    SectionNotFound { section: String },

    #[error("key {key:?} not found in section {section:?}")]
    KeyNotFound { section: String, key: String },

    #[error("value {value:?} of [{section}] {key} is not a valid integer")]
    ValueFormat {
        section: String,
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unsupported value type: {name:?}")]
    UnsupportedType { name: String },
}

/// Discriminant of [`Error`], for callers that only need to branch on the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    SectionNotFound,
    KeyNotFound,
    ValueFormat,
    UnsupportedType,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::Io { .. } => ErrorKind::Io,
            Self::SectionNotFound { .. } => ErrorKind::SectionNotFound,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::ValueFormat { .. } => ErrorKind::ValueFormat,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
        }
    }
}
