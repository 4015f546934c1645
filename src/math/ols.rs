//! Ordinary least squares via the normal equations.
//!
//! We solve small linear regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! by forming `XᵀX β = Xᵀy` and solving the square system with a dense LU
//! decomposition. The parameter dimension here is 2 (intercept + slope), so
//! the normal matrix is tiny and well conditioned for any non-degenerate time
//! index. A singular system means the design has fewer than two distinct
//! abscissae; that is reported as `None`, not papered over.

use nalgebra::{DMatrix, DVector};

/// Build the `[1, t]` design matrix for the given abscissae.
pub fn linear_design(ts: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(ts.len(), 2, |row, col| if col == 0 { 1.0 } else { ts[row] })
}

/// Solve the normal equations `(XᵀX) β = Xᵀy`.
///
/// Returns `None` if the system is singular or the solution is not finite.
pub fn solve_normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.nrows() < x.ncols() {
        return None;
    }

    let xt = x.transpose();
    let xtx = &xt * x;
    let xty = &xt * y;

    let beta = xtx.lu().solve(&xty)?;
    if beta.iter().all(|v| v.is_finite()) {
        Some(beta)
    } else {
        None
    }
}
