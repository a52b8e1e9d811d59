//! Metadata describing the configuration of a model run.

use std::fmt;

/// Floating-point precision assumed for parameter values.
#[allow(non_camel_case_types)]
pub type fpa = f64;

/// Standard metadata keys.
pub mod keys {
    pub const FMTOUT: &str = "fmtout";
    pub const F107A: &str = "F10.7A";
    pub const F107: &str = "F10.7";
    pub const AP: &str = "ap";
    pub const NEUTRAL_ATMOSPHERE_MODEL: &str = "Neutral Atmosphere Model";
    pub const EUV_MODEL: &str = "EUV Model";
    pub const IONS_USED: &str = "Ions Used";
    pub const NEUTRAL_MULTIPLIERS: [&str; 7] = [
        "H Multiplier",
        "O Multiplier",
        "NO Multiplier",
        "O2 Multiplier",
        "He Multiplier",
        "N2 Multiplier",
        "N Multiplier",
    ];
    pub const T_EXO_MULTIPLIER: &str = "T_exo Multiplier";
    pub const T_N_MULTIPLIER: &str = "T_n Multiplier";
    pub const EUV_MULTIPLIER: &str = "EUV Multiplier";
    pub const EXB_DRIFT_MULTIPLIER: &str = "ExB Drift Multiplier";
    pub const WIND_MULTIPLIER: &str = "Wind Multiplier";
    pub const EXB_MODEL: &str = "ExB model";
    pub const FOURIER_COEFFS: &str = "Fourier Coeffs";
    pub const WIND_MODEL: &str = "Wind Model";
    pub const RMIN: &str = "rmin";
    pub const RMAX: &str = "rmax";
    pub const GAMS: &str = "gams";
    pub const GAMP: &str = "gamp";
    pub const ALTMIN: &str = "altmin";
    pub const DTHR: &str = "dthr";
    pub const HRINIT: &str = "hrinit";
    pub const HRPR: &str = "hrpr";
    pub const HRMAX: &str = "hrmax";
    pub const DT0: &str = "dt0";
    pub const MAXSTEP: &str = "maxstep";
    pub const DENMIN: &str = "denmin";

    /// Marker identifying keys of scalar multipliers.
    pub const MULTIPLIER_MARKER: &str = "Multiplier";
}

/// Value of a metadata entry.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(fpa),
    Str(String),
    FloatArray(Vec<fpa>),
}

impl ParameterValue {
    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Self::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the value as a float, if it is numerical and scalar.
    pub fn as_float(&self) -> Option<fpa> {
        match *self {
            Self::Int(i) => Some(i as fpa),
            Self::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the array values, if this is an array.
    pub fn as_float_array(&self) -> Option<&[fpa]> {
        match self {
            Self::FloatArray(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Whether the value is a scalar number different from one.
    pub fn differs_from_unity(&self) -> bool {
        self.as_float().map_or(false, |value| value != 1.0)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(value) => write_float(f, *value),
            Self::Str(s) => write!(f, "{}", s),
            Self::FloatArray(values) => {
                write!(f, "[")?;
                for (index, &value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write_float(f, value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Writes the shortest representation of the given value, with a signed
/// exponent of at least two digits in scientific notation.
fn write_float(f: &mut fmt::Formatter<'_>, value: fpa) -> fmt::Result {
    if value.is_nan() {
        return write!(f, "nan");
    }
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => write!(f, "{}", repr),
    }
}

/// Insertion-ordered mapping from metadata keys to values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetaData {
    entries: Vec<(&'static str, ParameterValue)>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the given value, replacing any existing value for the key
    /// while keeping its original position.
    pub fn insert(&mut self, key: &'static str, value: ParameterValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParameterValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ParameterValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ParameterValue::as_int)
    }

    pub fn get_float(&self, key: &str) -> Option<fpa> {
        self.get(key).and_then(ParameterValue::as_float)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParameterValue::as_str)
    }

    pub fn get_float_array(&self, key: &str) -> Option<&[fpa]> {
        self.get(key).and_then(ParameterValue::as_float_array)
    }

    /// Returns the keys of entries that deviate from the standard empirical
    /// model configuration.
    ///
    /// Fourier coefficients for the ExB drift come first when present,
    /// followed by every multiplier whose value differs from one, in
    /// insertion order.
    pub fn modified_keys(&self) -> Vec<&'static str> {
        let fourier = self
            .keys()
            .filter(|&key| key == keys::FOURIER_COEFFS);
        let multipliers = self
            .iter()
            .filter(|(key, value)| {
                key.find(keys::MULTIPLIER_MARKER)
                    .map_or(false, |position| position > 0)
                    && value.differs_from_unity()
            })
            .map(|(key, _)| key);
        fourier.chain(multipliers).collect()
    }
}
