//! # bhmie
//!
//! Mie scattering by homogeneous spheres with the Bohren & Huffman algorithm.
//!
//! Given a size parameter, a complex refractive index relative to the medium
//! and a number of angles between 0 and 90 degrees, [`solver::solve`] returns
//! the scattering amplitudes S1 and S2 over [0, pi] together with the
//! extinction, scattering and backscatter efficiencies and the asymmetry
//! parameter.
//!
//! ```no_run
//! use bhmie::solver::bhmie;
//! use num_complex::Complex64;
//!
//! let result = bhmie(5.0, Complex64::new(1.5, 0.01), 10).unwrap();
//! println!("{}", result.efficiencies());
//! ```

pub mod bins;
pub mod config;
pub mod error;
pub mod output;
pub mod params;
pub mod request;
pub mod result;
pub mod settings;
pub mod solver;
pub mod terms;

pub use error::MieError;
pub use request::ScatteringRequest;
pub use result::ScatteringResult;
pub use solver::{bhmie, solve};
