//! Construction-time errors.
//!
//! Everything here is detected eagerly while building a scene. Per-frame
//! operations never return these.

use thiserror::Error;

/// Errors raised while validating and constructing scene components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A size-like input was zero, negative or not finite
    #[error("invalid dimension: {what} = {value}")]
    InvalidDimension { what: &'static str, value: f64 },
    /// Components were combined in a way that cannot render
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A house would have zero-area faces
    #[error("degenerate geometry: house size {size} must be positive")]
    DegenerateGeometry { size: f64 },
}

impl SceneError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        SceneError::Configuration(message.into())
    }
}

/// Rejects anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(what: &'static str, value: f64) -> Result<f64, SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SceneError::InvalidDimension { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("side", 2.0), Ok(2.0));
        assert!(require_positive("side", 0.0).is_err());
        assert!(require_positive("side", -1.0).is_err());
        assert!(require_positive("side", f64::NAN).is_err());
        assert!(require_positive("side", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = SceneError::InvalidDimension {
            what: "house_size",
            value: -0.5,
        };
        assert_eq!(err.to_string(), "invalid dimension: house_size = -0.5");

        let err = SceneError::DegenerateGeometry { size: 0.0 };
        assert!(err.to_string().contains("degenerate geometry"));

        let err = SceneError::config("anchor out of range");
        assert_eq!(err.to_string(), "configuration error: anchor out of range");
    }
}
