#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use sami2rs::{
    constants::{NF, NI, NZ},
    field::fdt,
    io::{
        archive::{ArchiveConfig, RunIdentity},
        output::{self, FieldDescriptor, OutputFormat},
        Endianness, EXB_FILE_NAME, NAMELIST_FILE_NAME, TIME_FILE_NAME,
    },
    model::LoadOptions,
};
use std::{
    fmt::Write as _,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub const TAG: &str = "fixture";
pub const LON: i32 = 256;
pub const YEAR: i32 = 2012;
pub const DAY: u32 = 210;

/// Number of values written on each line of formatted output files.
const VALUES_PER_LINE: usize = 10;

/// Every quantity in the output, with an identifier used to generate
/// distinct values for each.
pub const FIELDS: [(usize, FieldDescriptor); 9] = [
    (0, output::GLAT),
    (1, output::GLON),
    (2, output::ZALT),
    (3, output::DENI),
    (4, output::VSI),
    (5, output::TI),
    (6, output::TE),
    (7, output::DENN),
    (8, output::U4),
];

/// Returns the value stored at the given column-major position of the
/// quantity with the given identifier.
///
/// All values are integers small enough to be exact in single precision.
pub fn field_value(field_id: usize, flat_index: usize) -> fdt {
    (field_id * 1_000_000 + flat_index) as fdt
}

/// Returns the column-major flat index of the given multi-index for the
/// given shape.
pub fn column_major_index(index: &[usize], shape: &[usize]) -> usize {
    index
        .iter()
        .zip(shape)
        .rev()
        .fold(0, |flat, (&i, &n)| flat * n + i)
}

/// Settings of a synthetic model run.
#[derive(Clone, Debug)]
pub struct RunSpec {
    pub fmtout: bool,
    pub fejer: bool,
    pub write_neutrals: bool,
    pub n_time_steps: usize,
    pub dthr: f64,
    pub neutral_multipliers: [f64; 7],
    pub euv_scl: f64,
    pub tvexb0: f64,
    pub nion1: usize,
    pub nion2: usize,
    pub exb_coeffs: Vec<f64>,
}

impl Default for RunSpec {
    fn default() -> Self {
        Self {
            fmtout: true,
            fejer: true,
            write_neutrals: false,
            n_time_steps: 2,
            dthr: 0.25,
            neutral_multipliers: [1.0; 7],
            euv_scl: 1.0,
            tvexb0: 1.0,
            nion1: 1,
            nion2: 7,
            exb_coeffs: vec![10.0],
        }
    }
}

impl RunSpec {
    pub fn unformatted() -> Self {
        Self {
            fmtout: false,
            ..Self::default()
        }
    }

    /// Returns the universal times [hours] of the output time steps.
    pub fn universal_times(&self) -> Vec<f64> {
        (0..self.n_time_steps)
            .map(|step| step as f64 * self.dthr)
            .collect()
    }
}

/// Archive holding a single synthetic model run in a temporary directory.
pub struct RunFixture {
    root: TempDir,
    pub spec: RunSpec,
}

impl RunFixture {
    /// Writes the run described by the given settings into a new archive.
    pub fn new(spec: RunSpec) -> Self {
        let root = tempfile::tempdir().unwrap();
        let fixture = Self { root, spec };
        fs::create_dir_all(fixture.run_dir()).unwrap();
        fixture.write_namelist();
        fixture.write_time_file();
        if !fixture.spec.fejer {
            fixture.write_exb_file();
        }
        fixture.write_fields();
        fixture
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn run_dir(&self) -> PathBuf {
        self.root()
            .join(TAG)
            .join(format!("lon{:03}", LON))
            .join(format!("{}_{:03}", YEAR, DAY))
    }

    /// Configuration with the fixture archive as archive directory.
    pub fn config(&self) -> ArchiveConfig {
        ArchiveConfig::new("unused-test-data")
            .with_archive_dir(self.root())
            .unwrap()
    }

    pub fn identity(&self) -> RunIdentity {
        RunIdentity::new(TAG, LON, YEAR, DAY).unwrap()
    }

    pub fn options(&self) -> LoadOptions {
        LoadOptions {
            endianness: Endianness::Little,
            ..LoadOptions::default()
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_fmtout(self.spec.fmtout)
    }

    pub fn field_path(&self, descriptor: &FieldDescriptor) -> PathBuf {
        self.run_dir()
            .join(self.output_format().file_name(descriptor.stem))
    }

    fn write_namelist(&self) {
        let spec = &self.spec;
        let flag = |enabled: bool| if enabled { ".true." } else { ".false." };
        let multipliers: String = spec
            .neutral_multipliers
            .iter()
            .map(|value| format!("{:?},", value))
            .collect();
        let text = format!(
            "\
&go
  fmtout   = {fmtout},
  maxstep  = 100000000,
  hrmax    = 48.25,
  dt0      = 30.,
  dthr     = {dthr:?},
  hrpr     = 24.,
  grad_in  = 10,
  glat_in  = 0.,
  glon_in  = {lon}.,
  fejer    = {fejer},
  rmin     = 100.,
  rmax     = 2000.,
  altmin   = 85.,
  fbar     = 120.0,
  f10p7    = 110.5,
  ap       = 4,
  year     = {year},
  day      = {day},
  mmass    = 48,
  nion1    = {nion1},
  nion2    = {nion2},
  hrinit   = 0.,
  tvn0     = 1.,
  tvexb0   = {tvexb0:?},
  ve01     = 0.,
  gams     = 3,
  gamp     = 3,
  snn      = {multipliers}
  stn      = 1.,
  denmin   = 1.e-6,
  alt_crit = 150.,
  cqe      = 7.e-14,
  Tinf_scl = 1.,
  euv_scl  = {euv_scl:?},
  hwm_mod  = 14,
&end
",
            fmtout = flag(spec.fmtout),
            dthr = spec.dthr,
            lon = LON,
            fejer = flag(spec.fejer),
            year = YEAR,
            day = DAY,
            nion1 = spec.nion1,
            nion2 = spec.nion2,
            tvexb0 = spec.tvexb0,
            multipliers = multipliers,
            euv_scl = spec.euv_scl,
        );
        fs::write(self.run_dir().join(NAMELIST_FILE_NAME), text).unwrap();
    }

    fn write_time_file(&self) {
        let mut text = String::new();
        for (step, ut) in self.spec.universal_times().into_iter().enumerate() {
            let seconds = (ut * 3600.0).round() as u64;
            writeln!(
                text,
                "{:5}{:5}{:5}{:8.2}{:10.3}",
                step + 1,
                seconds / 3600,
                (seconds % 3600) / 60,
                (seconds % 60) as f64,
                ut
            )
            .unwrap();
        }
        fs::write(self.run_dir().join(TIME_FILE_NAME), text).unwrap();
    }

    fn write_exb_file(&self) {
        let text: String = self
            .spec
            .exb_coeffs
            .iter()
            .map(|coeff| format!("  {:?}\n", coeff))
            .collect();
        fs::write(self.run_dir().join(EXB_FILE_NAME), text).unwrap();
    }

    fn write_fields(&self) {
        for (field_id, descriptor) in FIELDS {
            if !self.spec.write_neutrals
                && (descriptor.stem == output::DENN.stem || descriptor.stem == output::U4.stem)
            {
                continue;
            }
            self.write_field(field_id, &descriptor);
        }
    }

    fn write_field(&self, field_id: usize, descriptor: &FieldDescriptor) {
        let payload_len = descriptor.payload_len();
        let n_records = descriptor.n_records(self.spec.n_time_steps);
        let values: Vec<fdt> = (0..payload_len * n_records)
            .map(|flat_index| field_value(field_id, flat_index))
            .collect();
        let file_path = self.field_path(descriptor);
        if self.spec.fmtout {
            write_formatted(&file_path, &values);
        } else {
            write_unformatted(&file_path, &values, payload_len);
        }
    }
}

/// Writes the given values as a whitespace-delimited text table.
pub fn write_formatted(file_path: &Path, values: &[fdt]) {
    let mut text = String::new();
    for line in values.chunks(VALUES_PER_LINE) {
        for value in line {
            write!(text, " {:14.6E}", value).unwrap();
        }
        text.push('\n');
    }
    fs::write(file_path, text).unwrap();
}

/// Writes the given values as little-endian unformatted records of the
/// given length.
pub fn write_unformatted(file_path: &Path, values: &[fdt], payload_len: usize) {
    let mut writer = BufWriter::new(fs::File::create(file_path).unwrap());
    let marker = (payload_len * std::mem::size_of::<fdt>()) as i32;
    for record in values.chunks(payload_len) {
        writer.write_i32::<LittleEndian>(marker).unwrap();
        for &value in record {
            writer.write_f32::<LittleEndian>(value).unwrap();
        }
        writer.write_i32::<LittleEndian>(marker).unwrap();
    }
    writer.flush().unwrap();
}

/// Shape of the fields with a species dimension.
pub fn species_shape(n_time_steps: usize) -> [usize; 4] {
    [NZ, NF, NI, n_time_steps]
}
