//! Winsorization operations for outlier handling.

use ndarray::Array1;

use crate::MathError;

/// Winsorize a 1D array at asymmetric order-statistic limits.
///
/// With `n` finite values sorted ascending, values below `sorted[floor(n * lower)]` are
/// raised to it and values above `sorted[n - 1 - floor(n * upper)]` are lowered to it.
/// Non-finite values pass through untouched. Applying the transform twice gives the
/// same result as applying it once.
///
/// # Arguments
/// * `data` - Input array
/// * `lower` - Fraction clipped from the bottom, in [0, 0.5)
/// * `upper` - Fraction clipped from the top, in [0, 0.5)
///
/// # Returns
/// Winsorized array.
///
/// # Errors
/// Returns `MathError::InvalidLimit` if either limit is outside [0, 0.5).
pub fn winsorize(data: &Array1<f64>, lower: f64, upper: f64) -> Result<Array1<f64>, MathError> {
    Ok(Winsorizer::new(lower, upper)?.apply(data))
}

/// Winsorization configuration and transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Winsorizer {
    lower: f64,
    upper: f64,
}

impl Winsorizer {
    /// Create a new winsorizer.
    ///
    /// # Arguments
    /// * `lower` - Must be in [0, 0.5)
    /// * `upper` - Must be in [0, 0.5)
    ///
    /// # Errors
    /// Returns `MathError::InvalidLimit` if a limit is not in the valid range.
    pub fn new(lower: f64, upper: f64) -> Result<Self, MathError> {
        for limit in [lower, upper] {
            if !(0.0..0.5).contains(&limit) {
                return Err(MathError::InvalidLimit(limit));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Get the lower limit.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Get the upper limit.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Clipping bounds for `data`, or `None` when it has no finite values.
    #[must_use]
    pub fn bounds(&self, data: &Array1<f64>) -> Option<(f64, f64)> {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let lower_idx = ((n as f64) * self.lower).floor() as usize;
        let upper_idx = n - 1 - ((n as f64) * self.upper).floor() as usize;

        Some((sorted[lower_idx.min(n - 1)], sorted[upper_idx]))
    }

    /// Apply winsorization to an array.
    #[must_use]
    pub fn apply(&self, data: &Array1<f64>) -> Array1<f64> {
        match self.bounds(data) {
            Some((lo, hi)) => data.mapv(|x| if x.is_finite() { x.clamp(lo, hi) } else { x }),
            None => data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn winsorize_clips_extremes() {
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let result = winsorize(&data, 0.1, 0.1).unwrap();

        assert_relative_eq!(result[9], 9.0);
        assert_relative_eq!(result[0], 2.0);
    }

    #[test]
    fn winsorize_preserves_middle() {
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let result = winsorize(&data, 0.1, 0.1).unwrap();

        assert_relative_eq!(result[4], 5.0, epsilon = 1e-10);
        assert_relative_eq!(result[5], 6.0, epsilon = 1e-10);
    }

    #[test]
    fn winsorize_asymmetric_limits() {
        let data = array![-50.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let result = winsorize(&data, 0.0, 0.1).unwrap();

        assert_relative_eq!(result[0], -50.0);
        assert_relative_eq!(result[9], 9.0);
    }

    #[test]
    fn winsorize_small_sample_is_untouched_at_one_percent() {
        let data = array![1.0, 2.0, 300.0];
        let result = winsorize(&data, 0.01, 0.01).unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn winsorize_is_idempotent() {
        let data = array![0.3, -0.9, 12.0, 0.05, 0.1, 0.2, -0.1, 0.4, 0.0, 5.0, 0.15, -0.2];
        let w = Winsorizer::new(0.1, 0.2).unwrap();
        let once = w.apply(&data);
        let twice = w.apply(&once);
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case(0.5)]
    #[case(0.6)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    fn invalid_limit_errors(#[case] pct: f64) {
        let data = array![1.0, 2.0, 3.0];
        assert!(winsorize(&data, pct, 0.01).is_err());
        assert!(winsorize(&data, 0.01, pct).is_err());
    }

    #[test]
    fn winsorize_handles_nan() {
        let data = array![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let result = winsorize(&data, 0.25, 0.25).unwrap();
        assert!(result[1].is_nan());
        assert_relative_eq!(result[0], 3.0);
        assert_relative_eq!(result[4], 4.0);
    }

    #[test]
    fn winsorize_empty_array() {
        let data: Array1<f64> = array![];
        let result = winsorize(&data, 0.1, 0.1).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn winsorizer_bounds() {
        let w = Winsorizer::new(0.1, 0.1).unwrap();
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(w.bounds(&data), Some((2.0, 9.0)));
        assert_eq!(w.bounds(&array![f64::NAN]), None);
    }
}
