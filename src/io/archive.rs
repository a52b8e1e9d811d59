//! Resolution of the directory holding the output of a model run.

use crate::error::{Result, Sami2Error};
use log::debug;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Environment variable holding the archive root directory.
pub const ARCHIVE_DIR_ENV_VAR: &str = "SAMI2_ARCHIVE_DIR";
/// Environment variable holding the test data directory.
pub const TEST_DATA_DIR_ENV_VAR: &str = "SAMI2_TEST_DATA_DIR";
/// Test data directory used when none is configured.
pub const DEFAULT_TEST_DATA_DIR: &str = "tests/data";

/// Root directories in which model runs are looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveConfig {
    archive_dir: Option<PathBuf>,
    test_data_dir: PathBuf,
}

impl ArchiveConfig {
    /// Creates a configuration with the given test data directory and
    /// no archive directory.
    pub fn new<P: AsRef<Path>>(test_data_dir: P) -> Self {
        Self {
            archive_dir: None,
            test_data_dir: test_data_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a configuration from the `SAMI2_ARCHIVE_DIR` and
    /// `SAMI2_TEST_DATA_DIR` environment variables.
    pub fn from_env() -> Self {
        let test_data_dir = env::var_os(TEST_DATA_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEST_DATA_DIR));
        Self {
            archive_dir: env::var_os(ARCHIVE_DIR_ENV_VAR).map(PathBuf::from),
            test_data_dir,
        }
    }

    /// Sets the archive directory, which must exist.
    pub fn with_archive_dir<P: AsRef<Path>>(mut self, archive_dir: P) -> Result<Self> {
        let archive_dir = archive_dir.as_ref();
        if !archive_dir.is_dir() {
            return Err(Sami2Error::ArchiveDirMissing(archive_dir.to_path_buf()));
        }
        self.archive_dir = Some(archive_dir.to_path_buf());
        Ok(self)
    }

    /// Sets the directory in which test runs are looked up.
    pub fn with_test_data_dir<P: AsRef<Path>>(mut self, test_data_dir: P) -> Self {
        self.test_data_dir = test_data_dir.as_ref().to_path_buf();
        self
    }

    /// Returns the archive directory, if one has been specified.
    pub fn archive_dir(&self) -> Option<&Path> {
        self.archive_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    pub fn test_data_dir(&self) -> &Path {
        self.test_data_dir.as_path()
    }

    /// Determines the directory holding the output of the given run.
    ///
    /// The directory is `<root>/<tag>/lon<lon>/<year>_<day>`, where the root
    /// is the test data directory for test runs and the archive directory
    /// otherwise.
    pub fn resolve(&self, identity: &RunIdentity) -> Result<PathBuf> {
        let root = if identity.test {
            Some(self.test_data_dir.as_path()).filter(|dir| !dir.as_os_str().is_empty())
        } else {
            self.archive_dir()
        }
        .ok_or(Sami2Error::ArchiveDirNotSpecified)?;

        let run_dir = root
            .join(&identity.tag)
            .join(format!("lon{:03}", identity.lon))
            .join(format!("{:4}_{:03}", identity.year, identity.day));
        debug!("Resolved run directory {}", run_dir.display());
        Ok(run_dir)
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_DATA_DIR)
    }
}

/// Identity of a single model run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunIdentity {
    tag: String,
    lon: i32,
    year: i32,
    day: u32,
    outn: bool,
    test: bool,
}

impl RunIdentity {
    /// Creates the identity of the run with the given name, reference
    /// longitude [deg], year and day of year.
    pub fn new<S: Into<String>>(tag: S, lon: i32, year: i32, day: u32) -> Result<Self> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(Sami2Error::invalid_argument("tag", "Run name is empty"));
        }
        if !(-360..=360).contains(&lon) {
            return Err(Sami2Error::invalid_argument(
                "longitude",
                format!("{} is outside [-360, 360] deg", lon),
            ));
        }
        if !(0..=9999).contains(&year) {
            return Err(Sami2Error::invalid_argument(
                "year",
                format!("{} is outside [0, 9999]", year),
            ));
        }
        if !(1..=366).contains(&day) {
            return Err(Sami2Error::invalid_argument(
                "day",
                format!("{} is outside [1, 366]", day),
            ));
        }
        Ok(Self {
            tag,
            lon,
            year,
            day,
            outn: false,
            test: false,
        })
    }

    /// Sets whether the neutral density and wind output should be loaded.
    pub fn with_neutral_outputs(mut self, outn: bool) -> Self {
        self.outn = outn;
        self
    }

    /// Sets whether the run should be looked up in the test data directory.
    pub fn with_test_data(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn lon(&self) -> i32 {
        self.lon
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Whether neutral density and wind output is included.
    pub fn outn(&self) -> bool {
        self.outn
    }

    /// Whether the run is taken from the test data directory.
    pub fn test(&self) -> bool {
        self.test
    }
}
