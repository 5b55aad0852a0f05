use num_complex::Complex64;
use thiserror::Error;

use crate::config;

/// Errors raised while validating or solving a scattering request.
///
/// Every variant is terminal for the request that produced it and carries the
/// offending input so the caller can report it. No partial results are returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MieError {
    #[error("number of angles {num_angles} exceeds the maximum of {}", config::MAX_ANGLES)]
    InvalidAngleCount { num_angles: usize },

    #[error(
        "series requires {nmx} terms for x = {x}, m = {m}, more than the maximum of {}",
        config::MAX_TERMS
    )]
    TermCountOverflow { x: f64, m: Complex64, nmx: usize },

    #[error("size parameter must be finite and greater than 0, got {x}")]
    DegenerateInput { x: f64 },

    #[error("refractive index must be finite with a positive real part, got {m}")]
    InvalidRefractiveIndex { m: Complex64 },

    #[error("diameter must be finite and greater than 0, got {diameter}")]
    InvalidDiameter { diameter: f64 },
}

#[cfg(feature = "python")]
impl From<MieError> for pyo3::PyErr {
    fn from(err: MieError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = MieError::InvalidAngleCount { num_angles: 1001 };
        assert!(err.to_string().contains("1001"));
        assert!(err.to_string().contains("1000"));

        let err = MieError::TermCountOverflow {
            x: 2.0e5,
            m: Complex64::new(1.5, 0.0),
            nmx: 200_123,
        };
        let msg = err.to_string();
        assert!(msg.contains("200123"), "{}", msg);
        assert!(msg.contains("1.5"), "{}", msg);

        let err = MieError::DegenerateInput { x: -1.0 };
        assert!(err.to_string().contains("-1"));
    }
}
