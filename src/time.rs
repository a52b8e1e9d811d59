//! Universal and solar local time of the model output.

use crate::{
    constants::{DAYS_PER_YEAR, MINUTES_PER_DAY, MINUTES_PER_DEGREE},
    drift::FourierSeries,
};
use log::warn;
use ndarray::prelude::*;
use std::f64::consts::PI;

/// Floating-point precision for times.
#[allow(non_camel_case_types)]
pub type ftm = f64;

/// Converts a clock time to decimal hours.
pub fn decimal_hours(hour: ftm, minute: ftm, second: ftm) -> ftm {
    hour + minute / 60.0 + second / 3600.0
}

/// Computes the equation-of-time correction [minutes] for the given day of year.
pub fn equation_of_time(day: u32) -> ftm {
    let mean_anomaly = 2.0 * PI * (day as ftm) / DAYS_PER_YEAR;
    -7.657 * mean_anomaly.sin() + 9.862 * (2.0 * mean_anomaly + 3.599).sin()
}

/// Computes the solar local time [hours] at the given universal time [hours],
/// longitude [deg] and day of year.
///
/// The equation-of-time correction is applied after wrapping the mean local
/// time, so the result can lie slightly outside [0, 24).
pub fn solar_local_time(ut: ftm, lon: ftm, day: u32) -> ftm {
    let local_time = (ut * 60.0 + lon * MINUTES_PER_DEGREE).rem_euclid(MINUTES_PER_DAY) / 60.0;
    local_time - equation_of_time(day) / 60.0
}

/// Computes the solar local time [hours] for each of the given universal times.
pub fn solar_local_times(ut: &Array1<ftm>, lon: ftm, day: u32) -> Array1<ftm> {
    ut.mapv(|ut| solar_local_time(ut, lon, day))
}

/// Time coordinate of a model run, with the quantities derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    ut: Array1<ftm>,
    slt: Array1<ftm>,
    exb: Option<Array1<ftm>>,
}

impl TimeSeries {
    /// Creates a new time series from universal times [hours] for the given
    /// longitude [deg] and day of year, reconstructing the ExB drift when a
    /// drift series is given.
    pub fn new(ut: Array1<ftm>, lon: ftm, day: u32, drift: Option<&FourierSeries>) -> Self {
        let slt = solar_local_times(&ut, lon, day);
        let n_outside = slt
            .iter()
            .filter(|&&slt| !(0.0..24.0).contains(&slt))
            .count();
        if n_outside > 0 {
            warn!(
                "{} solar local times fall outside [0, 24) after the equation-of-time correction",
                n_outside
            );
        }
        let exb = drift.map(|series| series.evaluate_series(&slt));
        Self { ut, slt, exb }
    }

    pub fn len(&self) -> usize {
        self.ut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ut.is_empty()
    }

    /// Returns the universal times [hours].
    pub fn ut(&self) -> ArrayView1<ftm> {
        self.ut.view()
    }

    /// Returns the solar local times [hours].
    pub fn slt(&self) -> ArrayView1<ftm> {
        self.slt.view()
    }

    /// Returns the reconstructed ExB drift [m/s], if the drift model is a
    /// Fourier series.
    pub fn exb(&self) -> Option<ArrayView1<ftm>> {
        self.exb.as_ref().map(|exb| exb.view())
    }

    /// Returns the earliest and latest universal time.
    pub fn ut_range(&self) -> (ftm, ftm) {
        self.ut.iter().fold(
            (ftm::INFINITY, ftm::NEG_INFINITY),
            |(min, max), &ut| (min.min(ut), max.max(ut)),
        )
    }
}
