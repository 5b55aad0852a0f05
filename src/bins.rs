use ndarray::Array1;
use std::f64::consts::{FRAC_PI_2, PI};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_grid_endpoints() {
        let thetas = half_thetas(10);
        assert_eq!(thetas.len(), 10);
        assert_eq!(thetas[0], 0.0);
        assert!((thetas[9] - FRAC_PI_2).abs() < 1e-15);
        assert!((thetas[1] - FRAC_PI_2 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn full_grid_has_no_duplicate_at_90() {
        let thetas = full_thetas(4);
        assert_eq!(thetas.len(), 7);
        for w in thetas.windows(2) {
            assert!(w[1] > w[0]);
        }
        assert!((thetas[3] - FRAC_PI_2).abs() < 1e-15);
        assert!((thetas[6] - PI).abs() < 1e-15);
    }

    #[test]
    fn cosines_match_grid() {
        let amu = cosines(3);
        assert_eq!(amu[0], 1.0);
        assert!((amu[1] - (PI / 4.0).cos()).abs() < 1e-15);
        assert!(amu[2].abs() < 1e-15);
    }
}

/// Scattering angles in radians, uniformly spaced over [0, pi/2] with
/// `num_angles` points.
pub fn half_thetas(num_angles: usize) -> Array1<f64> {
    Array1::linspace(0.0, FRAC_PI_2, num_angles)
}

/// Cosines of the forward-hemisphere angles. Index `j` holds `cos(j * dang)`.
pub fn cosines(num_angles: usize) -> Array1<f64> {
    let dang = FRAC_PI_2 / (num_angles - 1) as f64;
    Array1::from_iter((0..num_angles).map(|j| (j as f64 * dang).cos()))
}

/// The `2 * num_angles - 1` scattering angles over [0, pi] at which the
/// solver reports S1 and S2.
///
/// The backward half mirrors the forward grid about 90 degrees, dropping the
/// repeated 90 degree point.
pub fn full_thetas(num_angles: usize) -> Array1<f64> {
    let forward = half_thetas(num_angles);
    let backward = forward.iter().rev().skip(1).map(|theta| PI - theta);
    forward.iter().copied().chain(backward).collect()
}
