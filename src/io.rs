//! File input/output.

pub mod archive;
pub mod namelist;
pub mod output;
pub mod utils;

/// Name of the namelist file written by the simulation.
pub const NAMELIST_FILE_NAME: &str = "sami2py-1.00.namelist";
/// Name of the file holding the output times.
pub const TIME_FILE_NAME: &str = "time.dat";
/// Name of the file holding the Fourier coefficients of the ExB drift.
pub const EXB_FILE_NAME: &str = "exb.inp";

/// Little- or big-endian byte order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
    #[default]
    Native,
}
