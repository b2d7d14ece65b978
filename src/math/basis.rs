//! Polynomial feature expansion.
//!
//! A scalar `x` is expanded into the monomial row
//!
//! ```text
//! [1, x, x², ..., x^d]
//! ```
//!
//! so that a linear least-squares fit over the row recovers the coefficients of
//! a degree-`d` polynomial. The constant column comes first (intercept).

use nalgebra::DMatrix;

/// Number of columns produced for a polynomial of the given degree.
pub fn feature_len(degree: usize) -> usize {
    degree + 1
}

/// Fill a design row with the powers of `x`.
///
/// # Panics
/// Panics if `out` does not have length `feature_len(degree)`.
pub fn fill_design_row(x: f64, degree: usize, out: &mut [f64]) {
    assert_eq!(out.len(), feature_len(degree), "design row length");

    let mut power = 1.0;
    for slot in out.iter_mut() {
        *slot = power;
        power *= x;
    }
}

/// Build the `n × (degree + 1)` design matrix `Φ(X)`.
pub fn design_matrix(xs: &[f64], degree: usize) -> DMatrix<f64> {
    let k = feature_len(degree);
    let mut row = vec![0.0; k];
    let mut data = Vec::with_capacity(xs.len() * k);
    for &x in xs {
        fill_design_row(x, degree, &mut row);
        data.extend_from_slice(&row);
    }
    DMatrix::from_row_slice(xs.len(), k, &data)
}

/// Evaluate `Σ c_i x^i` with Horner's method (coefficients in ascending order).
pub fn eval_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_row_is_ascending_powers() {
        let mut row = [0.0; 6];
        fill_design_row(2.0, 5, &mut row);
        assert_eq!(row, [1.0, 2.0, 4.0, 8.0, 16.0, 32.0]);
    }

    #[test]
    fn design_matrix_shape_and_intercept() {
        let m = design_matrix(&[-1.0, 0.0, 0.5], 3);
        assert_eq!(m.shape(), (3, 4));
        assert!(m.column(0).iter().all(|&v| v == 1.0));
        assert_eq!(m[(0, 3)], -1.0);
        assert_eq!(m[(2, 2)], 0.25);
    }

    #[test]
    fn horner_matches_design_row_dot_product() {
        let coefs = [0.3, -1.0, 0.5, 2.0];
        let x = 0.7;
        let mut row = [0.0; 4];
        fill_design_row(x, 3, &mut row);
        let dot: f64 = row.iter().zip(coefs.iter()).map(|(a, b)| a * b).sum();
        assert!((eval_polynomial(&coefs, x) - dot).abs() < 1e-12);
    }

    #[test]
    fn degree_zero_is_constant() {
        assert_eq!(eval_polynomial(&[4.2], 123.0), 4.2);
        assert_eq!(design_matrix(&[9.0, -3.0], 0).shape(), (2, 1));
    }
}
