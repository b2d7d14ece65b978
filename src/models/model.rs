//! Polynomial regression: feature expansion followed by least squares.
//!
//! The model is split into two types so that predicting before fitting does
//! not compile:
//!
//! - `PolynomialRegression` only knows its degree and can be fitted
//! - `FittedPolynomial` owns the coefficients and can predict
//!
//! ```compile_fail
//! use generalization_error::models::PolynomialRegression;
//!
//! let model = PolynomialRegression::new(5);
//! let _ = model.predict(&[0.0, 0.5]);
//! ```
//!
//! ```
//! use generalization_error::models::PolynomialRegression;
//!
//! let xs = [-1.0, 0.0, 1.0, 2.0];
//! let ys: Vec<f64> = xs.iter().map(|x| 1.0 + 2.0 * x).collect();
//! let fitted = PolynomialRegression::new(1).fit(&xs, &ys).unwrap();
//! assert!((fitted.predict_one(3.0) - 7.0).abs() < 1e-9);
//! ```

use nalgebra::DVector;

use crate::error::ModelError;
use crate::math::{design_matrix, eval_polynomial, solve_least_squares};

/// An unfitted polynomial regression model of a fixed degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialRegression {
    degree: usize,
}

impl PolynomialRegression {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fit coefficients minimizing `‖y - Φ(x) w‖²`.
    ///
    /// `x` is the single input column, `y` the matching targets.
    pub fn fit(self, x: &[f64], y: &[f64]) -> Result<FittedPolynomial, ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::ShapeMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ModelError::NoData);
        }
        if let Some(idx) = x
            .iter()
            .zip(y.iter())
            .position(|(a, b)| !(a.is_finite() && b.is_finite()))
        {
            return Err(ModelError::NonFinite(idx));
        }

        let design = design_matrix(x, self.degree);
        let targets = DVector::from_column_slice(y);
        let beta = solve_least_squares(&design, &targets).ok_or(ModelError::Solve {
            degree: self.degree,
            n: x.len(),
        })?;

        Ok(FittedPolynomial {
            degree: self.degree,
            coefficients: beta.iter().copied().collect(),
        })
    }
}

/// A polynomial regression model with fitted coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPolynomial {
    degree: usize,
    coefficients: Vec<f64>,
}

impl FittedPolynomial {
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficients in ascending power order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn predict_one(&self, x: f64) -> f64 {
        eval_polynomial(&self.coefficients, x)
    }

    /// Predict `Φ(x) w` for every input.
    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.predict_one(v)).collect()
    }
}
