//! Series truncation for the Mie expansion.
//!
//! The scattered field is expanded in vector spherical harmonics and the sum
//! is cut after `nstop` terms, following the Wiscombe criterion used by
//! Bohren & Huffman. The logarithmic derivative of the internal field is
//! computed by downward recursion, which needs a starting index `nmx` well
//! beyond both `nstop` and `|m x|` for the seed value to have decayed.

use num_complex::Complex64;
use tracing::debug;

use crate::config;
use crate::error::MieError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_case_counts() {
        let terms = TermCounts::estimate(5.0, Complex64::new(1.5, 0.01)).unwrap();
        assert_eq!(terms.nstop, 13);
        assert_eq!(terms.nmx, 28);
    }

    #[test]
    fn large_index_drives_recursion_start() {
        // |m x| dominates xstop
        let terms = TermCounts::estimate(10.0, Complex64::new(10.0, 0.0)).unwrap();
        assert_eq!(terms.nstop, 20);
        assert_eq!(terms.nmx, 115);
        assert!(terms.nmx > terms.nstop);
    }

    #[test]
    fn small_sphere_keeps_minimum_terms() {
        let terms = TermCounts::estimate(0.01, Complex64::new(1.5, 0.0)).unwrap();
        assert_eq!(terms.nstop, 2);
        assert_eq!(terms.nmx, 17);
    }

    #[test]
    fn overflow_is_rejected() {
        let m = Complex64::new(1.5, 0.0);
        let err = TermCounts::estimate(2.0e5, m).unwrap_err();
        match err {
            MieError::TermCountOverflow { x, nmx, .. } => {
                assert_eq!(x, 2.0e5);
                assert!(nmx > config::MAX_TERMS);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

/// Number of terms used by the two recursions of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCounts {
    /// Terms summed in the upward Riccati-Bessel recursion.
    pub nstop: usize,
    /// Starting index of the downward logarithmic derivative recursion.
    pub nmx: usize,
}

impl TermCounts {
    /// Estimates the series length for size parameter `x` and relative
    /// refractive index `m`.
    ///
    /// Returns [`MieError::TermCountOverflow`] if the recursion would need more
    /// than [`config::MAX_TERMS`] terms.
    pub fn estimate(x: f64, m: Complex64) -> Result<Self, MieError> {
        let xstop = x + 4.0 * x.cbrt() + 2.0;
        let ymod = (m * x).norm();
        let nmx = (xstop.max(ymod) + config::TERM_MARGIN).floor();

        if nmx > config::MAX_TERMS as f64 {
            return Err(MieError::TermCountOverflow {
                x,
                m,
                nmx: nmx as usize,
            });
        }

        let terms = Self {
            nstop: xstop.floor() as usize,
            nmx: nmx as usize,
        };
        debug!(x, ymod, nstop = terms.nstop, nmx = terms.nmx, "estimated series length");

        Ok(terms)
    }
}
