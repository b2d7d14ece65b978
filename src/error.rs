//! Error types.
//!
//! Library modules return their own `thiserror` enums. The binary boundary
//! only deals with `AppError`, which carries the process exit code:
//!
//! - `2`: invalid configuration, filesystem or export failure
//! - `3`: invalid data passed to the model
//! - `4`: numeric or rendering failure

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Errors raised while fitting a polynomial regression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// `fit` was called with zero observations.
    #[error("No data points to fit")]
    NoData,

    /// Inputs and targets have different lengths.
    #[error("Shape mismatch: {x} inputs but {y} targets")]
    ShapeMismatch { x: usize, y: usize },

    /// An input or target is NaN or infinite.
    #[error("Non-finite value at index {0}")]
    NonFinite(usize),

    /// The least-squares solve failed or produced non-finite coefficients.
    #[error("Least-squares solve failed for degree {degree} on {n} points")]
    Solve { degree: usize, n: usize },
}

/// Errors raised while drawing or serializing the figure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("Figure has no data to plot")]
    Empty,

    #[error("Failed to draw figure: {0}")]
    Draw(String),

    #[error("Failed to parse rendered SVG: {0}")]
    Svg(String),

    #[error("Invalid raster size {width}x{height}")]
    RasterSize { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Png(String),

    #[error("Failed to convert figure to PDF: {0}")]
    Pdf(String),
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        let exit_code = match err {
            ModelError::Solve { .. } => 4,
            _ => 3,
        };
        AppError::new(exit_code, format!("Model fit failed: {err}"))
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::new(4, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_to_exit_codes() {
        let shape: AppError = ModelError::ShapeMismatch { x: 3, y: 2 }.into();
        assert_eq!(shape.exit_code(), 3);
        assert!(shape.to_string().contains("3 inputs but 2 targets"));

        let solve: AppError = ModelError::Solve { degree: 5, n: 20 }.into();
        assert_eq!(solve.exit_code(), 4);
    }
}
