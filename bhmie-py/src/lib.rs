use bhmie::{result::ScatteringResult, solve, ScatteringRequest};
use num_complex::Complex64;
use pyo3::prelude::*;

/// Mie scattering by a homogeneous sphere.
///
/// `x` is the size parameter, `m_re + i m_im` the refractive index relative to
/// the medium and `nang` the number of angles between 0 and 90 degrees.
/// Cross sections are only computed when `diameter` is given.
#[pyfunction]
#[pyo3(name = "bhmie", signature = (x, m_re, m_im, nang, diameter = None))]
fn py_bhmie(
    x: f64,
    m_re: f64,
    m_im: f64,
    nang: usize,
    diameter: Option<f64>,
) -> PyResult<ScatteringResult> {
    let mut request = ScatteringRequest::new(x, Complex64::new(m_re, m_im), nang);
    request.diameter = diameter;
    Ok(solve(&request)?)
}

/// Mie scattering from the sphere radius and vacuum wavelength.
#[pyfunction]
#[pyo3(name = "bhmie_physical", signature = (radius, wavelength, m_re, m_im, nang, medium = 1.0))]
fn py_bhmie_physical(
    radius: f64,
    wavelength: f64,
    m_re: f64,
    m_im: f64,
    nang: usize,
    medium: f64,
) -> PyResult<ScatteringResult> {
    let request = ScatteringRequest::from_physical(
        radius,
        wavelength,
        Complex64::new(m_re, m_im),
        medium,
        nang,
    );
    Ok(solve(&request)?)
}

#[pymodule]
fn _bhmie_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_bhmie, m)?)?;
    m.add_function(wrap_pyfunction!(py_bhmie_physical, m)?)?;
    m.add_class::<ScatteringResult>()?;
    Ok(())
}
