//! Reconstruction of the ExB drift from Fourier coefficients.

use crate::{
    metadata::{fpa, keys, MetaData},
    time::ftm,
};
use ndarray::prelude::*;
use std::f64::consts::PI;

/// Period of the drift series [hours of local time].
const PERIOD_HOURS: ftm = 24.0;

/// Truncated Fourier series in local time.
///
/// The coefficients are ordered as `[c0, a1, b1, a2, b2, ...]`, giving
/// `y(x) = c0 + sum_i (a_i cos(2 pi i x / 24) + b_i sin(2 pi i x / 24))`.
/// A trailing coefficient without a partner is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct FourierSeries {
    coeffs: Vec<fpa>,
}

impl FourierSeries {
    /// Creates a new Fourier series from the given coefficients, or returns
    /// `None` if there is no constant term.
    pub fn from_coefficients(coeffs: &[fpa]) -> Option<Self> {
        if coeffs.is_empty() {
            None
        } else {
            Some(Self {
                coeffs: coeffs.to_vec(),
            })
        }
    }

    /// Creates the drift series described by the given metadata, if the
    /// drift model is a Fourier series.
    pub fn from_metadata(metadata: &MetaData) -> Option<Self> {
        metadata
            .get_float_array(keys::FOURIER_COEFFS)
            .and_then(Self::from_coefficients)
    }

    /// Returns the number of harmonics included in the series.
    pub fn n_harmonics(&self) -> usize {
        (self.coeffs.len() - 1) / 2
    }

    /// Evaluates the series at the given local time [hours].
    pub fn evaluate(&self, local_time: ftm) -> ftm {
        (1..=self.n_harmonics()).fold(self.coeffs[0], |sum, i| {
            let phase = (i as ftm) * 2.0 * PI * local_time / PERIOD_HOURS;
            sum + self.coeffs[2 * i - 1] * phase.cos() + self.coeffs[2 * i] * phase.sin()
        })
    }

    /// Evaluates the series at each of the given local times [hours].
    pub fn evaluate_series(&self, local_times: &Array1<ftm>) -> Array1<ftm> {
        local_times.mapv(|local_time| self.evaluate(local_time))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_series_is_constant() {
        let series = FourierSeries::from_coefficients(&[25.0]).unwrap();
        assert_eq!(series.n_harmonics(), 0);
        let values = series.evaluate_series(&array![0.0, 3.5, 12.0, 23.9]);
        assert!(values.iter().all(|&value| value == 25.0));
    }

    #[test]
    fn harmonics_have_a_daily_period() {
        let series = FourierSeries::from_coefficients(&[1.0, 2.0, 3.0]).unwrap();
        assert_abs_diff_eq!(series.evaluate(0.0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series.evaluate(6.0), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series.evaluate(12.0), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series.evaluate(30.0), series.evaluate(6.0), epsilon = 1e-12);
    }

    #[test]
    fn unpaired_coefficient_is_ignored() {
        let full = FourierSeries::from_coefficients(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let truncated = FourierSeries::from_coefficients(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(full.n_harmonics(), 1);
        assert_eq!(full.evaluate(7.3), truncated.evaluate(7.3));
    }

    #[test]
    fn empty_coefficients_give_no_series() {
        assert!(FourierSeries::from_coefficients(&[]).is_none());
    }
}
