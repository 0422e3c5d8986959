//! Descriptive statistics over return series.

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median, `None` for an empty slice.
#[must_use]
pub fn median(data: &[f64]) -> Option<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    crate::quantile_linear(&sorted, 0.5)
}

/// Sample standard deviation (n - 1 denominator), `None` with fewer than two values.
#[must_use]
pub fn sample_std(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / (data.len() - 1) as f64).sqrt())
}

/// Running product of `1 + r`.
#[must_use]
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |acc, r| {
            *acc *= 1.0 + r;
            Some(*acc)
        })
        .collect()
}

/// Drawdown of a cumulative series relative to its running maximum.
///
/// Each value is `cum / running_max - 1`, so it is zero at a new peak and negative
/// below one.
#[must_use]
pub fn drawdowns(cumulative: &[f64]) -> Vec<f64> {
    cumulative
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &c| {
            *peak = peak.max(c);
            Some(c / *peak - 1.0)
        })
        .collect()
}

/// Most negative drawdown of a return series; zero if it never falls below a peak.
#[must_use]
pub fn max_drawdown(returns: &[f64]) -> f64 {
    drawdowns(&cumulative_returns(returns)).into_iter().fold(0.0, f64::min)
}

/// Pearson correlation of two equally long slices.
///
/// Returns `None` when the lengths differ, fewer than two pairs exist, or either side
/// has zero variance.
#[must_use]
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let ma = mean(a)?;
    let mb = mean(b)?;
    let (mut sab, mut saa, mut sbb) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }
    let denom = (saa * sbb).sqrt();
    (denom > 0.0).then(|| sab / denom)
}
