//! Ordinary least squares solver.
//!
//! The regression model solves one small problem of the form:
//!
//! ```text
//! minimize ‖y - Φ w‖²
//! ```
//!
//! where `Φ` is the polynomial design matrix.
//!
//! We use SVD rather than the normal equations: the monomial columns on
//! `[-1, 1]` are strongly correlated, and SVD also returns the minimum-norm
//! solution when there are fewer rows than columns.
//! (Nalgebra's `QR::solve` only handles square systems.)

use nalgebra::{DMatrix, DVector};

/// Singular values below these thresholds are treated as zero, tried in order.
const SVD_TOLERANCES: [f64; 3] = [1e-12, 1e-10, 1e-8];

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no tolerance yields a finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.ncols() == 0 {
        return None;
    }

    let svd = x.clone().svd(true, true);

    for &tol in &SVD_TOLERANCES {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_averages_overdetermined_constant() {
        let x = DMatrix::from_element(4, 1, 1.0);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 6.0]);
        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 3.0).abs() < 1e-12, "expected the mean, got {}", beta[0]);
    }

    #[test]
    fn least_squares_rejects_mismatched_rows() {
        let x = DMatrix::from_element(3, 2, 1.0);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }
}
