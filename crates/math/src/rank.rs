//! Fractional ranking with averaged ties.

use ndarray::Array1;

/// Direction in which ranks are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankOrder {
    /// Smallest value receives rank 1.
    Ascending,
    /// Largest value receives rank 1.
    #[default]
    Descending,
}

/// Rank values with ties receiving the mean of the positions they span.
///
/// Ranks start at 1. Ties are detected by exact equality. NaN inputs receive a NaN rank
/// and do not occupy a position.
///
/// # Arguments
/// * `data` - Values to rank
/// * `order` - Which end of the distribution receives rank 1
///
/// # Returns
/// Array of ranks aligned with `data`.
#[must_use]
pub fn average_rank(data: &Array1<f64>, order: RankOrder) -> Array1<f64> {
    let mut ranks = Array1::from_elem(data.len(), f64::NAN);

    let mut idx: Vec<usize> = (0..data.len()).filter(|&i| !data[i].is_nan()).collect();
    match order {
        RankOrder::Ascending => idx.sort_by(|&a, &b| data[a].total_cmp(&data[b])),
        RankOrder::Descending => idx.sort_by(|&a, &b| data[b].total_cmp(&data[a])),
    }

    let mut start = 0;
    while start < idx.len() {
        let mut end = start + 1;
        while end < idx.len() && data[idx[end]] == data[idx[start]] {
            end += 1;
        }
        // Positions start+1 ..= end share their mean.
        let avg = (start + 1 + end) as f64 / 2.0;
        for &i in &idx[start..end] {
            ranks[i] = avg;
        }
        start = end;
    }

    ranks
}
