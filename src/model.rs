//! Loading of a complete model run.

use crate::{
    drift::FourierSeries,
    error::{Result, Sami2Error},
    field::FieldData,
    grid::GridCoordinates,
    io::{
        archive::{ArchiveConfig, RunIdentity},
        namelist::{self, Namelist, NamelistLayout},
        output::{OutputFormat, OutputReader},
        utils, Endianness, EXB_FILE_NAME, NAMELIST_FILE_NAME,
    },
    metadata::{fpa, keys, MetaData},
    time::TimeSeries,
};
use log::info;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Options controlling how the output files are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Byte order of unformatted output files.
    pub endianness: Endianness,
    /// Line layout of the namelist file.
    pub layout: NamelistLayout,
}

/// Output of a SAMI2 model run, reshaped and labeled.
#[derive(Clone, Debug)]
pub struct Model {
    identity: RunIdentity,
    run_dir: PathBuf,
    namelist: Namelist,
    metadata: MetaData,
    grid: GridCoordinates,
    fields: FieldData,
    time: TimeSeries,
}

impl Model {
    /// Loads the model run with the given identity from the directories
    /// of the given configuration.
    pub fn load(
        config: &ArchiveConfig,
        identity: RunIdentity,
        options: &LoadOptions,
    ) -> Result<Self> {
        let run_dir = config.resolve(&identity)?;
        Self::load_from_dir(run_dir, identity, options)
    }

    /// Loads the model run with the given identity from the given directory.
    pub fn load_from_dir<P: AsRef<Path>>(
        run_dir: P,
        identity: RunIdentity,
        options: &LoadOptions,
    ) -> Result<Self> {
        let run_dir = run_dir.as_ref().to_path_buf();
        info!("Loading run {} from {}", identity.tag(), run_dir.display());

        let namelist = Namelist::new(run_dir.join(NAMELIST_FILE_NAME))?;
        let metadata = namelist::parse_metadata(&namelist, &options.layout, || {
            read_fourier_coefficients(run_dir.join(EXB_FILE_NAME))
        })?;

        let format = OutputFormat::from_fmtout(metadata.get_bool(keys::FMTOUT).unwrap_or(false));
        let reader = OutputReader::new(&run_dir, format, options.endianness);

        let ut = reader.read_universal_times()?;
        let n_time_steps = ut.len();

        let grid = reader.read_grid()?;
        let fields = reader.read_fields(n_time_steps, identity.outn())?;

        let drift = FourierSeries::from_metadata(&metadata);
        let time = TimeSeries::new(
            ut,
            identity.lon() as f64,
            identity.day(),
            drift.as_ref(),
        );

        info!(
            "Loaded {} time steps of {} output",
            n_time_steps,
            match format {
                OutputFormat::Formatted => "formatted",
                OutputFormat::Unformatted => "unformatted",
            }
        );

        Ok(Self {
            identity,
            run_dir,
            namelist,
            metadata,
            grid,
            fields,
            time,
        })
    }

    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    /// Returns the directory the run was loaded from.
    pub fn run_dir(&self) -> &Path {
        self.run_dir.as_path()
    }

    /// Returns the lines of the namelist file of the run.
    pub fn namelist(&self) -> &[String] {
        self.namelist.lines()
    }

    pub fn metadata(&self) -> &MetaData {
        &self.metadata
    }

    pub fn grid(&self) -> &GridCoordinates {
        &self.grid
    }

    pub fn fields(&self) -> &FieldData {
        &self.fields
    }

    pub fn time(&self) -> &TimeSeries {
        &self.time
    }

    /// Returns the metadata keys of every setting that deviates from the
    /// standard empirical models.
    pub fn check_standard_model(&self) -> Vec<&'static str> {
        self.metadata.modified_keys()
    }

    fn metadata_value(&self, key: &str) -> String {
        self.metadata
            .get(key)
            .map_or_else(|| "unknown".to_string(), |value| value.to_string())
    }
}

/// Reads the ExB drift Fourier coefficients, which must include at least
/// the constant term.
fn read_fourier_coefficients(file_path: PathBuf) -> Result<Vec<fpa>> {
    let coeffs: Vec<fpa> = utils::read_text_values(&file_path)?;
    if coeffs.is_empty() {
        return Err(Sami2Error::table(&file_path, "No Fourier coefficients found"));
    }
    Ok(coeffs)
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ut_min, ut_max) = self.time.ut_range();

        writeln!(f, "Model Run Name = {}", self.identity.tag())?;
        writeln!(f, "Day {:03}, {:4}", self.identity.day(), self.identity.year())?;
        writeln!(f, "Longitude = {} deg", self.identity.lon())?;
        writeln!(
            f,
            "{} time steps from {:4.1} to {:4.1} UT",
            self.time.len(),
            ut_min,
            ut_max
        )?;
        writeln!(f, "Ions Used: {}", self.metadata_value(keys::IONS_USED))?;

        writeln!(f, "\nSolar Activity")?;
        writeln!(f, "--------------")?;
        writeln!(
            f,
            "F10.7: {:5.1} sfu",
            self.metadata.get_float(keys::F107).unwrap_or(f64::NAN)
        )?;
        writeln!(
            f,
            "F10.7A: {:5.1} sfu",
            self.metadata.get_float(keys::F107A).unwrap_or(f64::NAN)
        )?;
        writeln!(f, "ap: {}", self.metadata_value(keys::AP))?;

        writeln!(f, "\nComponent Models Used")?;
        writeln!(f, "---------------------")?;
        writeln!(
            f,
            "Neutral Atmosphere: {}",
            self.metadata_value(keys::NEUTRAL_ATMOSPHERE_MODEL)
        )?;
        writeln!(f, "Winds: {}", self.metadata_value(keys::WIND_MODEL))?;
        writeln!(f, "Photoproduction: {}", self.metadata_value(keys::EUV_MODEL))?;
        writeln!(f, "ExB Drifts: {}", self.metadata_value(keys::EXB_MODEL))?;

        let modified_keys = self.check_standard_model();
        if modified_keys.is_empty() {
            write!(f, "\nNo modifications to empirical models")
        } else {
            writeln!(f, "\nMultipliers used")?;
            write!(f, "----------------")?;
            for key in modified_keys {
                write!(f, "\n{}: {}", key, self.metadata_value(key))?;
            }
            Ok(())
        }
    }
}
