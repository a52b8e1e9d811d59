//! The `sami2rs` crate loads the output of SAMI2 ionosphere model runs.
//!
//! A run is identified by its name, reference longitude, year and day of
//! year, and is located through an [`ArchiveConfig`](io::archive::ArchiveConfig).
//! Loading parses the namelist into [`MetaData`](metadata::MetaData), reads
//! the grid and field output in either formatted or unformatted mode, and
//! derives the solar local time and, when applicable, the ExB drift.

pub mod constants;
pub mod drift;
pub mod error;
pub mod field;
pub mod grid;
pub mod io;
pub mod metadata;
pub mod model;
pub mod time;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ErrorKind, Result, Sami2Error};
pub use io::archive::{ArchiveConfig, RunIdentity};
pub use model::{LoadOptions, Model};
