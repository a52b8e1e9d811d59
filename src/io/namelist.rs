//! Parsing of the positional namelist file written by the simulation.
//!
//! The namelist is read by fixed line index, and values are extracted as
//! the n-th numerical token on a line. Digits that are part of a parameter
//! name (like the `0` in `dt0`) count as tokens, and signs and exponents
//! are not part of a token.

use super::utils;
use crate::{
    constants::{
        EUV_MODEL, FEJER_SCHERLIESS_MODEL, FOURIER_SERIES_MODEL, ION_SPECIES,
        NEUTRAL_ATMOSPHERE_MODEL,
    },
    error::{Result, Sami2Error},
    metadata::{fpa, keys, MetaData, ParameterValue},
};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref FLOAT_TOKEN: Regex = Regex::new(r"\d*\.\d+|\d+").unwrap();
    static ref INT_TOKEN: Regex = Regex::new(r"\d+").unwrap();
}

/// Literal marking an enabled boolean flag.
const TRUE_LITERAL: &str = ".true.";

/// Line indices of the parameters in a namelist file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamelistLayout {
    pub fmtout: usize,
    pub maxstep: usize,
    pub hrmax: usize,
    pub dt0: usize,
    pub dthr: usize,
    pub hrpr: usize,
    pub fejer: usize,
    pub rmin: usize,
    pub rmax: usize,
    pub altmin: usize,
    pub fbar: usize,
    pub f10p7: usize,
    pub ap: usize,
    pub nion1: usize,
    pub nion2: usize,
    pub hrinit: usize,
    pub tvn0: usize,
    pub tvexb0: usize,
    pub gams: usize,
    pub gamp: usize,
    pub snn: usize,
    pub stn: usize,
    pub denmin: usize,
    pub tinf_scl: usize,
    pub euv_scl: usize,
    pub hwm_mod: usize,
}

impl NamelistLayout {
    /// Layout of the `sami2py-1.00.namelist` file.
    pub const SAMI2PY_1_00: Self = Self {
        fmtout: 1,
        maxstep: 2,
        hrmax: 3,
        dt0: 4,
        dthr: 5,
        hrpr: 6,
        fejer: 10,
        rmin: 11,
        rmax: 12,
        altmin: 13,
        fbar: 14,
        f10p7: 15,
        ap: 16,
        nion1: 20,
        nion2: 21,
        hrinit: 22,
        tvn0: 23,
        tvexb0: 24,
        gams: 26,
        gamp: 27,
        snn: 28,
        stn: 29,
        denmin: 30,
        tinf_scl: 33,
        euv_scl: 34,
        hwm_mod: 35,
    };

    /// Returns the number of lines a namelist must at least have.
    pub fn required_lines(&self) -> usize {
        [
            self.fmtout,
            self.maxstep,
            self.hrmax,
            self.dt0,
            self.dthr,
            self.hrpr,
            self.fejer,
            self.rmin,
            self.rmax,
            self.altmin,
            self.fbar,
            self.f10p7,
            self.ap,
            self.nion1,
            self.nion2,
            self.hrinit,
            self.tvn0,
            self.tvexb0,
            self.gams,
            self.gamp,
            self.snn,
            self.stn,
            self.denmin,
            self.tinf_scl,
            self.euv_scl,
            self.hwm_mod,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

impl Default for NamelistLayout {
    fn default() -> Self {
        Self::SAMI2PY_1_00
    }
}

/// Lines of a namelist file.
#[derive(Clone, Debug, PartialEq)]
pub struct Namelist {
    lines: Vec<String>,
}

impl Namelist {
    /// Reads the namelist file at the given path.
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        Ok(Self::from_text(&utils::read_text_file(file_path)?))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn line(&self, index: usize) -> Result<&str> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                Sami2Error::namelist(
                    index,
                    format!("Namelist has only {} lines", self.lines.len()),
                )
            })
    }

    /// Whether the given line enables a boolean flag.
    pub fn flag(&self, index: usize) -> Result<bool> {
        Ok(self.line(index)?.contains(TRUE_LITERAL))
    }

    /// Returns every float token on the given line.
    pub fn floats(&self, index: usize) -> Result<Vec<fpa>> {
        let line = self.line(index)?;
        FLOAT_TOKEN
            .find_iter(line)
            .map(|token| parse_token(token.as_str(), index))
            .collect()
    }

    /// Returns the float token with the given occurrence index on the given line.
    pub fn find_float(&self, index: usize, occurrence: usize) -> Result<fpa> {
        let line = self.line(index)?;
        let token = nth_token(&FLOAT_TOKEN, line, index, occurrence)?;
        let value = parse_token(token, index)?;
        trace!("Line {} float {}: {}", index, occurrence, value);
        Ok(value)
    }

    /// Returns the integer token with the given occurrence index on the given line.
    pub fn find_int(&self, index: usize, occurrence: usize) -> Result<i64> {
        let line = self.line(index)?;
        let token = nth_token(&INT_TOKEN, line, index, occurrence)?;
        let value = parse_token(token, index)?;
        trace!("Line {} integer {}: {}", index, occurrence, value);
        Ok(value)
    }
}

fn nth_token<'a>(
    regex: &Regex,
    line: &'a str,
    index: usize,
    occurrence: usize,
) -> Result<&'a str> {
    regex
        .find_iter(line)
        .nth(occurrence)
        .map(|token| token.as_str())
        .ok_or_else(|| {
            Sami2Error::namelist(
                index,
                format!("No numerical token {} in `{}`", occurrence, line.trim()),
            )
        })
}

fn parse_token<T>(token: &str, index: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    token.parse::<T>().map_err(|err| {
        Sami2Error::namelist(index, format!("Failed parsing `{}`: {}", token, err))
    })
}

/// Generates the run metadata from the given namelist.
///
/// When the namelist selects Fourier mode for the ExB drift,
/// `load_fourier_coeffs` is called to obtain the coefficients.
pub fn parse_metadata<F>(
    namelist: &Namelist,
    layout: &NamelistLayout,
    load_fourier_coeffs: F,
) -> Result<MetaData>
where
    F: FnOnce() -> Result<Vec<fpa>>,
{
    let required_lines = layout.required_lines();
    if namelist.lines().len() < required_lines {
        return Err(Sami2Error::namelist(
            namelist.lines().len(),
            format!(
                "Namelist is truncated, expected at least {} lines",
                required_lines
            ),
        ));
    }

    let mut metadata = MetaData::new();

    metadata.insert(keys::FMTOUT, ParameterValue::Bool(namelist.flag(layout.fmtout)?));

    metadata.insert(
        keys::F107A,
        ParameterValue::Float(namelist.find_float(layout.fbar, 0)?),
    );
    metadata.insert(
        keys::F107,
        ParameterValue::Float(namelist.find_float(layout.f10p7, 2)?),
    );
    metadata.insert(keys::AP, ParameterValue::Int(namelist.find_int(layout.ap, 0)?));

    metadata.insert(
        keys::NEUTRAL_ATMOSPHERE_MODEL,
        ParameterValue::Str(NEUTRAL_ATMOSPHERE_MODEL.to_string()),
    );
    metadata.insert(keys::EUV_MODEL, ParameterValue::Str(EUV_MODEL.to_string()));

    metadata.insert(
        keys::IONS_USED,
        ParameterValue::Str(parse_ions_used(namelist, layout)?),
    );

    let neutral_multipliers = namelist.floats(layout.snn)?;
    if neutral_multipliers.len() < keys::NEUTRAL_MULTIPLIERS.len() {
        return Err(Sami2Error::namelist(
            layout.snn,
            format!(
                "Expected {} neutral multipliers, found {}",
                keys::NEUTRAL_MULTIPLIERS.len(),
                neutral_multipliers.len()
            ),
        ));
    }
    for (key, value) in keys::NEUTRAL_MULTIPLIERS
        .into_iter()
        .zip(neutral_multipliers)
    {
        metadata.insert(key, ParameterValue::Float(value));
    }
    metadata.insert(
        keys::T_EXO_MULTIPLIER,
        ParameterValue::Float(namelist.find_float(layout.tinf_scl, 0)?),
    );
    metadata.insert(
        keys::T_N_MULTIPLIER,
        ParameterValue::Float(namelist.find_float(layout.stn, 0)?),
    );
    metadata.insert(
        keys::EUV_MULTIPLIER,
        ParameterValue::Float(namelist.find_float(layout.euv_scl, 0)?),
    );
    metadata.insert(
        keys::EXB_DRIFT_MULTIPLIER,
        ParameterValue::Float(namelist.find_float(layout.tvexb0, 1)?),
    );
    metadata.insert(
        keys::WIND_MULTIPLIER,
        ParameterValue::Float(namelist.find_float(layout.tvn0, 1)?),
    );

    if namelist.flag(layout.fejer)? {
        metadata.insert(
            keys::EXB_MODEL,
            ParameterValue::Str(FEJER_SCHERLIESS_MODEL.to_string()),
        );
    } else {
        metadata.insert(
            keys::EXB_MODEL,
            ParameterValue::Str(FOURIER_SERIES_MODEL.to_string()),
        );
        metadata.insert(
            keys::FOURIER_COEFFS,
            ParameterValue::FloatArray(load_fourier_coeffs()?),
        );
    }

    let wind_model = namelist.find_int(layout.hwm_mod, 0)?;
    metadata.insert(
        keys::WIND_MODEL,
        ParameterValue::Str(format!("HWM-{:02}", wind_model)),
    );

    metadata.insert(
        keys::RMIN,
        ParameterValue::Float(namelist.find_float(layout.rmin, 0)?),
    );
    metadata.insert(
        keys::RMAX,
        ParameterValue::Float(namelist.find_float(layout.rmax, 0)?),
    );
    metadata.insert(keys::GAMS, ParameterValue::Int(namelist.find_int(layout.gams, 0)?));
    metadata.insert(keys::GAMP, ParameterValue::Int(namelist.find_int(layout.gamp, 0)?));
    metadata.insert(
        keys::ALTMIN,
        ParameterValue::Float(namelist.find_float(layout.altmin, 0)?),
    );

    metadata.insert(
        keys::DTHR,
        ParameterValue::Float(namelist.find_float(layout.dthr, 0)?),
    );
    metadata.insert(
        keys::HRINIT,
        ParameterValue::Float(namelist.find_float(layout.hrinit, 0)?),
    );
    metadata.insert(
        keys::HRPR,
        ParameterValue::Float(namelist.find_float(layout.hrpr, 0)?),
    );
    metadata.insert(
        keys::HRMAX,
        ParameterValue::Float(namelist.find_float(layout.hrmax, 0)?),
    );
    metadata.insert(
        keys::DT0,
        ParameterValue::Float(namelist.find_float(layout.dt0, 0)?),
    );
    metadata.insert(
        keys::MAXSTEP,
        ParameterValue::Int(namelist.find_int(layout.maxstep, 0)?),
    );
    metadata.insert(
        keys::DENMIN,
        ParameterValue::Float(namelist.find_float(layout.denmin, 0)?),
    );

    Ok(metadata)
}

/// Determines the comma-separated list of ion species included in the run.
///
/// The species numbers on the `nion1` and `nion2` lines are one-based, and
/// the upper one is exclusive once shifted to a zero-based index.
fn parse_ions_used(namelist: &Namelist, layout: &NamelistLayout) -> Result<String> {
    let species_index = |line: usize| -> Result<usize> {
        let number = namelist.find_int(line, 1)?;
        if number < 1 {
            return Err(Sami2Error::namelist(
                line,
                format!("Invalid ion species number {}", number),
            ));
        }
        Ok(((number - 1) as usize).min(ION_SPECIES.len()))
    };
    let start = species_index(layout.nion1)?;
    let end = species_index(layout.nion2)?;
    Ok(if start < end {
        ION_SPECIES[start..end].join(", ")
    } else {
        String::new()
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    const SAMPLE_NAMELIST: &str = "\
&go
  fmtout   = .true.,
  maxstep  = 100000000,
  hrmax    = 48.25,
  dt0      = 30.,
  dthr     = 0.25,
  hrpr     = 24.,
  grad_in  = 10,
  glat_in  = 0.,
  glon_in  = 0.,
  fejer    = .true.,
  rmin     = 100.,
  rmax     = 2000.,
  altmin   = 85.,
  fbar     = 120.0,
  f10p7    = 110.5,
  ap       = 4,
  year     = 2012,
  day      = 210,
  mmass    = 48,
  nion1    = 1,
  nion2    = 7,
  hrinit   = 0.,
  tvn0     = 1.,
  tvexb0   = 1.,
  ve01     = 0.,
  gams     = 3,
  gamp     = 3,
  snn      = 1.,1.,1.,1.,1.,1.,1.,
  stn      = 1.,
  denmin   = 1.e-6,
  alt_crit = 150.,
  cqe      = 7.e-14,
  Tinf_scl = 1.,
  euv_scl  = 1.,
  hwm_mod  = 14,
&end
";

    fn no_coeffs() -> Result<Vec<fpa>> {
        panic!("Fourier coefficients should not be loaded")
    }

    #[test]
    fn token_extraction_works() {
        let namelist = Namelist::from_text("  f10p7    = 110.5,\n  dt0      = 30.,\n");
        assert_eq!(namelist.find_float(0, 0).unwrap(), 10.0);
        assert_eq!(namelist.find_float(0, 1).unwrap(), 7.0);
        assert_eq!(namelist.find_float(0, 2).unwrap(), 110.5);
        assert_eq!(namelist.find_int(0, 2).unwrap(), 110);
        assert_eq!(namelist.find_int(0, 3).unwrap(), 5);
        assert_eq!(namelist.find_float(1, 0).unwrap(), 0.0);
        assert_eq!(namelist.find_float(1, 1).unwrap(), 30.0);
    }

    #[test]
    fn missing_tokens_give_namelist_errors() {
        let namelist = Namelist::from_text("  fmtout = .true.,\n");
        assert!(matches!(
            namelist.find_float(0, 0),
            Err(Sami2Error::Namelist { line: 0, .. })
        ));
        assert!(matches!(
            namelist.find_int(3, 0),
            Err(Sami2Error::Namelist { line: 3, .. })
        ));
    }

    #[test]
    fn metadata_parsing_works() {
        #![allow(clippy::float_cmp)]
        let namelist = Namelist::from_text(SAMPLE_NAMELIST);
        let metadata =
            parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, no_coeffs).unwrap();

        assert_eq!(metadata.get_bool(keys::FMTOUT), Some(true));
        assert_eq!(metadata.get_float(keys::F107A), Some(120.0));
        assert_eq!(metadata.get_float(keys::F107), Some(110.5));
        assert_eq!(metadata.get_int(keys::AP), Some(4));
        assert_eq!(
            metadata.get_str(keys::IONS_USED),
            Some("H+, O+, NO+, O2+, He+, N2+")
        );
        assert_eq!(metadata.get_str(keys::EXB_MODEL), Some("Fejer-Scherliess"));
        assert!(!metadata.contains_key(keys::FOURIER_COEFFS));
        assert_eq!(metadata.get_str(keys::WIND_MODEL), Some("HWM-14"));
        assert_eq!(metadata.get_float(keys::RMAX), Some(2000.0));
        assert_eq!(metadata.get_int(keys::GAMS), Some(3));
        assert_eq!(metadata.get_float(keys::ALTMIN), Some(85.0));
        assert_eq!(metadata.get_float(keys::DTHR), Some(0.25));
        assert_eq!(metadata.get_float(keys::HRMAX), Some(48.25));
        assert_eq!(metadata.get_int(keys::MAXSTEP), Some(100000000));
        // The digit in the parameter name is the first token on these lines
        assert_eq!(metadata.get_float(keys::DT0), Some(0.0));
        assert_eq!(metadata.get_float(keys::DENMIN), Some(1.0));
        assert!(metadata.modified_keys().is_empty());
    }

    #[test]
    fn metadata_keys_are_ordered() {
        let namelist = Namelist::from_text(SAMPLE_NAMELIST);
        let metadata =
            parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, no_coeffs).unwrap();
        let keys: Vec<_> = metadata.keys().collect();
        assert_eq!(keys.len(), 33);
        assert_eq!(keys[0], keys::FMTOUT);
        assert_eq!(keys[7], "H Multiplier");
        assert_eq!(keys[19], keys::EXB_MODEL);
        assert_eq!(keys[32], keys::DENMIN);
    }

    #[test]
    fn fourier_mode_loads_coefficients() {
        let text = SAMPLE_NAMELIST.replace("fejer    = .true.", "fejer    = .false.");
        let namelist = Namelist::from_text(&text);
        let metadata = parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, || {
            Ok(vec![10.0, 1.0, 2.0])
        })
        .unwrap();
        assert_eq!(metadata.get_str(keys::EXB_MODEL), Some("Fourier Series"));
        assert_eq!(
            metadata.get_float_array(keys::FOURIER_COEFFS),
            Some(&[10.0, 1.0, 2.0][..])
        );
        assert_eq!(metadata.modified_keys(), vec![keys::FOURIER_COEFFS]);
    }

    #[test]
    fn multipliers_are_mapped_positionally() {
        let text = SAMPLE_NAMELIST
            .replace("1.,1.,1.,1.,1.,1.,1.", "1.,2.,1.,1.,1.,0.5,1.")
            .replace("euv_scl  = 1.", "euv_scl  = 1.5");
        let namelist = Namelist::from_text(&text);
        let metadata =
            parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, no_coeffs).unwrap();
        assert_eq!(metadata.get_float("O Multiplier"), Some(2.0));
        assert_eq!(metadata.get_float("N2 Multiplier"), Some(0.5));
        assert_eq!(
            metadata.modified_keys(),
            vec!["O Multiplier", "N2 Multiplier", keys::EUV_MULTIPLIER]
        );
    }

    #[test]
    fn ion_range_is_sliced() {
        let text = SAMPLE_NAMELIST
            .replace("nion1    = 1", "nion1    = 2")
            .replace("nion2    = 7", "nion2    = 4");
        let namelist = Namelist::from_text(&text);
        let metadata =
            parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, no_coeffs).unwrap();
        assert_eq!(metadata.get_str(keys::IONS_USED), Some("O+, NO+"));
    }

    #[test]
    fn truncated_namelist_fails() {
        let text: String = SAMPLE_NAMELIST
            .lines()
            .take(20)
            .map(|line| format!("{}\n", line))
            .collect();
        let namelist = Namelist::from_text(&text);
        let result = parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, no_coeffs);
        assert!(matches!(result, Err(Sami2Error::Namelist { .. })));
    }

    #[test]
    fn malformed_line_fails() {
        let text = SAMPLE_NAMELIST.replace("ap       = 4", "ap       = x");
        let namelist = Namelist::from_text(&text);
        let result = parse_metadata(&namelist, &NamelistLayout::SAMI2PY_1_00, no_coeffs);
        assert!(matches!(result, Err(Sami2Error::Namelist { line: 16, .. })));
    }
}
