//! Error type for loading SAMI2 output, and macros for exiting on errors.

use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Sami2Error>;

/// Broad category of a `Sami2Error`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Argument,
    Io,
    Format,
}

/// Errors that can occur while resolving or loading a model run.
#[derive(Debug, Error)]
pub enum Sami2Error {
    #[error("Archive directory not specified, set it with ArchiveConfig::with_archive_dir")]
    ArchiveDirNotSpecified,

    #[error("Archive directory {} does not exist", .0.display())]
    ArchiveDirMissing(PathBuf),

    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed namelist line {line}: {reason}")]
    Namelist { line: usize, reason: String },

    #[error("Malformed table in {}: {reason}", path.display())]
    Table { path: PathBuf, reason: String },

    #[error("Malformed unformatted file {}: {reason}", path.display())]
    Record { path: PathBuf, reason: String },

    #[error("Inconsistent shape for {name}: {reason}")]
    Shape { name: String, reason: String },
}

impl Sami2Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_argument<S: Into<String>>(name: &'static str, reason: S) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn namelist<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::Namelist {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn table<S: Into<String>>(path: &Path, reason: S) -> Self {
        Self::Table {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn record<S: Into<String>>(path: &Path, reason: S) -> Self {
        Self::Record {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn shape<N: Into<String>, S: Into<String>>(name: N, reason: S) -> Self {
        Self::Shape {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArchiveDirNotSpecified | Self::ArchiveDirMissing(_) => ErrorKind::Configuration,
            Self::InvalidArgument { .. } => ErrorKind::Argument,
            Self::Io { .. } => ErrorKind::Io,
            Self::Namelist { .. }
            | Self::Table { .. }
            | Self::Record { .. }
            | Self::Shape { .. } => ErrorKind::Format,
        }
    }
}

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}
