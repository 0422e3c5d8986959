//! Linear algebra operations for regression estimation.

use ndarray::{Array1, Array2};

use crate::MathError;

/// Result of an ordinary least squares regression.
#[derive(Debug, Clone)]
pub struct OlsResult {
    /// Estimated coefficients.
    pub coefficients: Array1<f64>,
    /// Standard error of each coefficient. NaN when there are no residual degrees of
    /// freedom.
    pub std_errors: Array1<f64>,
    /// Residuals.
    pub residuals: Array1<f64>,
    /// R-squared.
    pub r_squared: f64,
    /// Residual degrees of freedom (`n - p`).
    pub df_resid: usize,
}

impl OlsResult {
    /// Residual variance estimate `SSR / df`, NaN without degrees of freedom.
    #[must_use]
    pub fn sigma_squared(&self) -> f64 {
        if self.df_resid == 0 {
            return f64::NAN;
        }
        self.residuals.iter().map(|r| r * r).sum::<f64>() / self.df_resid as f64
    }

    /// t-statistic of coefficient `j`.
    ///
    /// NaN when the standard error is undefined or not above `tolerance`, which covers
    /// exact fits whose residuals are pure rounding noise.
    #[must_use]
    pub fn t_stat(&self, j: usize, tolerance: f64) -> f64 {
        let se = self.std_errors[j];
        if se.is_finite() && se > tolerance { self.coefficients[j] / se } else { f64::NAN }
    }
}

/// Perform ordinary least squares regression.
///
/// Solves: argmin_beta sum((y_i - X_i * beta)^2) via the normal equations and reports
/// classical standard errors from `sigma^2 (X'X)^-1`.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x p), including an intercept column if one is wanted
///
/// # Returns
/// OLS result with coefficients, standard errors and residuals.
///
/// # Errors
/// Returns error if dimensions mismatch, data is empty, or `X'X` is singular.
pub fn ordinary_least_squares(y: &Array1<f64>, x: &Array2<f64>) -> Result<OlsResult, MathError> {
    let n = y.len();
    let p = x.ncols();

    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }
    if n == 0 || p == 0 {
        return Err(MathError::EmptyData);
    }

    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);
    let xtx_inv = invert(&xtx)?;
    let coefficients = xtx_inv.dot(&xty);

    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;

    let y_mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r.powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    let df_resid = n.saturating_sub(p);
    let sigma2 = if df_resid > 0 { ss_res / df_resid as f64 } else { f64::NAN };
    let std_errors = Array1::from_iter((0..p).map(|j| (sigma2 * xtx_inv[[j, j]]).sqrt()));

    Ok(OlsResult { coefficients, std_errors, residuals, r_squared, df_resid })
}

/// Invert a square matrix by solving against each column of the identity.
fn invert(a: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let n = a.nrows();
    let mut inv = Array2::zeros((n, n));
    for j in 0..n {
        let mut e = Array1::zeros(n);
        e[j] = 1.0;
        let col = solve_linear_system(a, &e)?;
        inv.column_mut(j).assign(&col);
    }
    Ok(inv)
}

/// Solve a linear system Ax = b using Gaussian elimination with partial pivoting.
fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if b.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: b.len() });
    }

    // Augmented matrix [A | b]
    let mut aug = Array2::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val < 1e-14 * scale {
            return Err(MathError::LinearAlgebra(
                "matrix is singular or nearly singular".to_string(),
            ));
        }

        if max_row != col {
            for j in 0..=n {
                aug.swap([col, j], [max_row, j]);
            }
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for j in col..=n {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    // Back substitution
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[[i, n]];
        for j in (i + 1)..n {
            sum -= aug[[i, j]] * x[j];
        }
        x[i] = sum / aug[[i, i]];
    }

    Ok(x)
}
