//! Input description of a single Mie scattering problem.

use num_complex::Complex64;
use serde::Deserialize;
use std::f64::consts::PI;
use tracing::warn;

use crate::config;
use crate::error::MieError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_count_is_clamped() {
        let request = ScatteringRequest::new(1.0, Complex64::new(1.5, 0.0), 1);
        assert_eq!(request.validate().unwrap(), 2);
        let request = ScatteringRequest::new(1.0, Complex64::new(1.5, 0.0), 0);
        assert_eq!(request.validate().unwrap(), 2);
        let request = ScatteringRequest::new(1.0, Complex64::new(1.5, 0.0), 1000);
        assert_eq!(request.validate().unwrap(), 1000);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let m = Complex64::new(1.5, 0.0);
        assert_eq!(
            ScatteringRequest::new(1.0, m, 1001).validate(),
            Err(MieError::InvalidAngleCount { num_angles: 1001 })
        );
        assert_eq!(
            ScatteringRequest::new(0.0, m, 10).validate(),
            Err(MieError::DegenerateInput { x: 0.0 })
        );
        assert!(matches!(
            ScatteringRequest::new(f64::NAN, m, 10).validate(),
            Err(MieError::DegenerateInput { .. })
        ));
        assert!(matches!(
            ScatteringRequest::new(1.0, Complex64::new(-1.5, 0.0), 10).validate(),
            Err(MieError::InvalidRefractiveIndex { .. })
        ));
        assert_eq!(
            ScatteringRequest::new(1.0, m, 10)
                .with_diameter(0.0)
                .validate(),
            Err(MieError::InvalidDiameter { diameter: 0.0 })
        );
    }

    #[test]
    fn physical_units() {
        let request = ScatteringRequest::from_physical(
            0.525,
            0.6328,
            Complex64::new(1.55, 0.0),
            1.0,
            11,
        );
        assert!((request.size_parameter - 5.212819668567135).abs() < 1e-12);
        assert_eq!(request.diameter, Some(1.05));

        // water droplet in water is index matched
        let request = ScatteringRequest::from_physical(
            1.0,
            0.5,
            Complex64::new(1.33, 0.0),
            1.33,
            2,
        );
        assert!((request.refr_index.re - 1.0).abs() < 1e-15);
        assert!((request.size_parameter - 4.0 * PI * 1.33).abs() < 1e-12);
    }
}

/// A homogeneous sphere illuminated by a plane wave.
///
/// The refractive index is relative to the surrounding medium and follows the
/// `m = n + ik` convention, with `k >= 0` for absorbing particles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScatteringRequest {
    /// Size parameter `2 pi r / lambda`, with lambda the wavelength in the medium.
    pub size_parameter: f64,
    /// Relative complex refractive index of the sphere.
    pub refr_index: Complex64,
    /// Number of angles between 0 and 90 degrees.
    pub num_angles: usize,
    /// Physical diameter, only used to scale efficiencies to cross sections.
    #[serde(default)]
    pub diameter: Option<f64>,
}

impl ScatteringRequest {
    pub fn new(size_parameter: f64, refr_index: Complex64, num_angles: usize) -> Self {
        Self {
            size_parameter,
            refr_index,
            num_angles,
            diameter: None,
        }
    }

    /// Builds a request from the sphere radius, vacuum wavelength (same length
    /// units as the radius), particle refractive index and real refractive
    /// index of the medium. The diameter is set so cross sections come out in
    /// squared length units.
    pub fn from_physical(
        radius: f64,
        wavelength: f64,
        particle_refr_index: Complex64,
        medium_refr_index: f64,
        num_angles: usize,
    ) -> Self {
        Self {
            size_parameter: 2.0 * PI * radius * medium_refr_index / wavelength,
            refr_index: particle_refr_index / medium_refr_index,
            num_angles,
            diameter: Some(2.0 * radius),
        }
    }

    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    /// Checks the request and returns the number of angles the solver will use.
    pub fn validate(&self) -> Result<usize, MieError> {
        if self.num_angles > config::MAX_ANGLES {
            return Err(MieError::InvalidAngleCount {
                num_angles: self.num_angles,
            });
        }
        let x = self.size_parameter;
        if !x.is_finite() || x <= 0.0 {
            return Err(MieError::DegenerateInput { x });
        }
        let m = self.refr_index;
        if !m.is_finite() || m.re <= 0.0 {
            return Err(MieError::InvalidRefractiveIndex { m });
        }
        if let Some(diameter) = self.diameter {
            if !diameter.is_finite() || diameter <= 0.0 {
                return Err(MieError::InvalidDiameter { diameter });
            }
        }

        if self.num_angles < config::MIN_ANGLES {
            warn!(
                requested = self.num_angles,
                used = config::MIN_ANGLES,
                "too few angles, clamping"
            );
            return Ok(config::MIN_ANGLES);
        }
        Ok(self.num_angles)
    }
}
