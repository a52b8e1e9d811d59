//! Structural constants of the SAMI2 output and the empirical models it uses.

/// Number of grid points along each flux tube.
pub const NZ: usize = 101;
/// Number of flux tubes.
pub const NF: usize = 98;
/// Number of ion species.
pub const NI: usize = 7;

/// Ion species, in the order of the species dimension of the output.
pub const ION_SPECIES: [&str; NI] = ["H+", "O+", "NO+", "O2+", "He+", "N2+", "N+"];

/// Neutral species whose densities can be scaled in the namelist.
pub const NEUTRAL_SPECIES: [&str; 7] = ["H", "O", "NO", "O2", "He", "N2", "N"];

/// Empirical neutral atmosphere model built into the simulation.
pub const NEUTRAL_ATMOSPHERE_MODEL: &str = "NRLMSISe-2000";
/// Photoproduction model built into the simulation.
pub const EUV_MODEL: &str = "EUVAC";
/// Empirical ExB drift model.
pub const FEJER_SCHERLIESS_MODEL: &str = "Fejer-Scherliess";
/// ExB drift model reconstructed from Fourier coefficients.
pub const FOURIER_SERIES_MODEL: &str = "Fourier Series";

/// Length of the tropical year [days].
pub const DAYS_PER_YEAR: f64 = 365.242;
/// Minutes in a day.
pub const MINUTES_PER_DAY: f64 = 1440.0;
/// Minutes of local time per degree of longitude.
pub const MINUTES_PER_DEGREE: f64 = 4.0;
