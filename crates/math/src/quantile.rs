//! Quantile estimation and equal-frequency binning.

use ndarray::Array1;

use crate::MathError;

/// Linear-interpolated quantile of an ascending slice.
///
/// Uses the position `q * (n - 1)` and interpolates between its neighbours.
///
/// # Arguments
/// * `sorted` - Finite values sorted ascending
/// * `q` - Quantile in [0, 1]
///
/// # Returns
/// The quantile, or `None` for an empty slice.
#[must_use]
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Number of distinct non-NaN values.
#[must_use]
pub fn distinct_count(data: &Array1<f64>) -> usize {
    let mut values: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values.len()
}

/// Quantile edges at `k / n_bins` for `k = 0..=n_bins`.
///
/// # Errors
/// Returns `MathError::InvalidBinCount` for zero bins and `MathError::EmptyData` when no
/// value is finite.
pub fn quantile_edges(data: &Array1<f64>, n_bins: usize) -> Result<Vec<f64>, MathError> {
    if n_bins == 0 {
        return Err(MathError::InvalidBinCount(n_bins));
    }
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if sorted.is_empty() {
        return Err(MathError::EmptyData);
    }
    sorted.sort_by(f64::total_cmp);

    Ok((0..=n_bins)
        .filter_map(|k| quantile_linear(&sorted, k as f64 / n_bins as f64))
        .collect())
}

/// Assign each value to one of `n_bins` equal-frequency bins.
///
/// Bins are right-closed intervals between consecutive quantile edges, with the lowest
/// edge included in bin 0. Bin 0 therefore holds the smallest values.
///
/// # Arguments
/// * `data` - Finite values to bin
/// * `n_bins` - Number of bins
///
/// # Returns
/// Bin index per value, aligned with `data`.
///
/// # Errors
/// * `MathError::InsufficientDistinct` if there are fewer distinct values than bins
/// * `MathError::NonIncreasingEdges` if two interpolated edges coincide
/// * `MathError::InvalidBinCount` / `MathError::EmptyData` as for [`quantile_edges`]
pub fn quantile_bins(data: &Array1<f64>, n_bins: usize) -> Result<Vec<usize>, MathError> {
    if n_bins == 0 {
        return Err(MathError::InvalidBinCount(n_bins));
    }
    let distinct = distinct_count(data);
    if distinct < n_bins {
        return Err(MathError::InsufficientDistinct { distinct, required: n_bins });
    }

    let edges = quantile_edges(data, n_bins)?;
    if edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::NonIncreasingEdges);
    }

    Ok(data
        .iter()
        .map(|&x| edges[1..].iter().position(|&edge| x <= edge).unwrap_or(n_bins - 1))
        .collect())
}
