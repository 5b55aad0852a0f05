use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::fmt;

use crate::bins;
use crate::params::{CrossSections, Efficiencies};
use crate::request::ScatteringRequest;
use crate::terms::TermCounts;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bhmie;
    use std::f64::consts::PI;

    #[test]
    fn intensities_are_consistent() {
        let result = bhmie(3.0, Complex64::new(1.5, 0.01), 6).unwrap();
        let natural = result.natural();
        let perp = result.perpendicular();
        let par = result.parallel();
        assert_eq!(natural.len(), 11);
        for i in 0..natural.len() {
            assert!((natural[i] - (perp[i] + par[i])).abs() < 1e-12 * natural[i]);
            assert!((perp[i] - result.s1()[i].norm_sqr()).abs() < 1e-12 * perp[i].max(1e-300));
        }
    }

    #[test]
    fn mueller_elements() {
        let result = bhmie(3.0, Complex64::new(1.5, 0.01), 6).unwrap();
        let mueller = result.mueller();
        assert_eq!(mueller.dim(), (11, 4));
        for i in 0..11 {
            let (s11, s12, s33, s34) = (
                mueller[[i, 0]],
                mueller[[i, 1]],
                mueller[[i, 2]],
                mueller[[i, 3]],
            );
            // the sphere Mueller matrix is a pure (non-depolarising) one
            let lhs = s12 * s12 + s33 * s33 + s34 * s34;
            assert!((lhs - s11 * s11).abs() < 1e-10 * s11 * s11);
        }
        // no polarisation in the exact forward direction
        assert!(result.polarization()[0].abs() < 1e-12);
    }

    #[test]
    fn arbitrary_angles_match_grid() {
        let result = bhmie(5.0, Complex64::new(1.5, 0.01), 10).unwrap();
        let thetas = result.thetas();
        for (i, theta) in thetas.iter().enumerate() {
            let (s1, s2) = result.amplitudes_at(*theta);
            assert!((s1 - result.s1()[i]).norm() < 1e-9 * result.s1()[0].norm());
            assert!((s2 - result.s2()[i]).norm() < 1e-9 * result.s1()[0].norm());
        }
        assert!((thetas[thetas.len() - 1] - PI).abs() < 1e-15);
    }

    #[test]
    fn cross_sections_require_diameter() {
        let result = bhmie(5.0, Complex64::new(1.5, 0.01), 10).unwrap();
        assert_eq!(result.cross_sections().csca, 0.0);
        assert_eq!(result.cross_sections().cext, 0.0);
    }
}

/// Scattering amplitudes and integral parameters of a single sphere.
///
/// S1 and S2 are sampled at `2 * num_angles - 1` angles uniformly spaced over
/// [0, pi]; see [`ScatteringResult::thetas`]. The Mie coefficients are kept so
/// the amplitudes can be evaluated at any other angle.
#[cfg_attr(feature = "python", pyo3::pyclass(frozen))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringResult {
    request: ScatteringRequest,
    terms: TermCounts,
    s1: Array1<Complex64>,
    s2: Array1<Complex64>,
    an: Vec<Complex64>,
    bn: Vec<Complex64>,
    efficiencies: Efficiencies,
    cross_sections: CrossSections,
}

impl ScatteringResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        request: ScatteringRequest,
        terms: TermCounts,
        s1: Array1<Complex64>,
        s2: Array1<Complex64>,
        an: Vec<Complex64>,
        bn: Vec<Complex64>,
        efficiencies: Efficiencies,
        cross_sections: CrossSections,
    ) -> Self {
        Self {
            request,
            terms,
            s1,
            s2,
            an,
            bn,
            efficiencies,
            cross_sections,
        }
    }

    /// The request that produced this result, with the angle count actually used.
    pub fn request(&self) -> &ScatteringRequest {
        &self.request
    }

    pub fn num_angles(&self) -> usize {
        self.request.num_angles
    }

    pub fn terms(&self) -> TermCounts {
        self.terms
    }

    /// Amplitude for perpendicular polarisation.
    pub fn s1(&self) -> &Array1<Complex64> {
        &self.s1
    }

    /// Amplitude for parallel polarisation.
    pub fn s2(&self) -> &Array1<Complex64> {
        &self.s2
    }

    /// Electric multipole coefficients `a_1..a_nstop`.
    pub fn an(&self) -> &[Complex64] {
        &self.an
    }

    /// Magnetic multipole coefficients `b_1..b_nstop`.
    pub fn bn(&self) -> &[Complex64] {
        &self.bn
    }

    pub fn efficiencies(&self) -> &Efficiencies {
        &self.efficiencies
    }

    pub fn cross_sections(&self) -> &CrossSections {
        &self.cross_sections
    }

    /// Scattering angles in radians at which `s1` and `s2` are sampled.
    pub fn thetas(&self) -> Array1<f64> {
        bins::full_thetas(self.request.num_angles)
    }

    /// Unpolarised intensity `|S1|^2 + |S2|^2`.
    pub fn natural(&self) -> Array1<f64> {
        ndarray::Zip::from(&self.s1)
            .and(&self.s2)
            .map_collect(|s1, s2| s1.norm_sqr() + s2.norm_sqr())
    }

    /// Intensity for perpendicular polarisation `|S1|^2`.
    pub fn perpendicular(&self) -> Array1<f64> {
        self.s1.mapv(|s| s.norm_sqr())
    }

    /// Intensity for parallel polarisation `|S2|^2`.
    pub fn parallel(&self) -> Array1<f64> {
        self.s2.mapv(|s| s.norm_sqr())
    }

    /// The independent Mueller matrix elements S11, S12, S33, S34 at each
    /// angle, one row per angle.
    pub fn mueller(&self) -> Array2<f64> {
        let mut mueller = Array2::<f64>::zeros((self.s1.len(), 4));
        for (index, (s1, s2)) in self.s1.iter().zip(self.s2.iter()).enumerate() {
            let cross = s2 * s1.conj();
            mueller[[index, 0]] = 0.5 * (s2.norm_sqr() + s1.norm_sqr());
            mueller[[index, 1]] = 0.5 * (s2.norm_sqr() - s1.norm_sqr());
            mueller[[index, 2]] = cross.re;
            mueller[[index, 3]] = cross.im;
        }
        mueller
    }

    /// Degree of linear polarisation `-S12/S11` for unpolarised incident light.
    pub fn polarization(&self) -> Array1<f64> {
        ndarray::Zip::from(&self.s1)
            .and(&self.s2)
            .map_collect(|s1, s2| (s1.norm_sqr() - s2.norm_sqr()) / (s1.norm_sqr() + s2.norm_sqr()))
    }

    /// Evaluates S1 and S2 at scattering angle `theta` (radians) directly from
    /// the Mie coefficients.
    pub fn amplitudes_at(&self, theta: f64) -> (Complex64, Complex64) {
        let mu = theta.cos();
        let mut pi0 = 0.0;
        let mut pi1 = 1.0;
        let mut s1 = Complex64::new(0.0, 0.0);
        let mut s2 = Complex64::new(0.0, 0.0);

        for (i, (an, bn)) in self.an.iter().copied().zip(self.bn.iter().copied()).enumerate() {
            let en = (i + 1) as f64;
            let fn_ = (2.0 * en + 1.0) / (en * (en + 1.0));
            let pi = pi1;
            let tau = en * mu * pi - (en + 1.0) * pi0;

            s1 += fn_ * (an * pi + bn * tau);
            s2 += fn_ * (an * tau + bn * pi);

            pi1 = ((2.0 * en + 1.0) * mu * pi - (en + 1.0) * pi0) / en;
            pi0 = pi;
        }

        (s1, s2)
    }

    pub fn print(&self) {
        println!("{}", self);
    }
}

#[cfg(feature = "python")]
#[pyo3::pymethods]
impl ScatteringResult {
    #[getter]
    fn get_s1(&self) -> Vec<Complex64> {
        self.s1.to_vec()
    }

    #[getter]
    fn get_s2(&self) -> Vec<Complex64> {
        self.s2.to_vec()
    }

    #[getter]
    fn get_qext(&self) -> f64 {
        self.efficiencies.qext
    }

    #[getter]
    fn get_qsca(&self) -> f64 {
        self.efficiencies.qsca
    }

    #[getter]
    fn get_qback(&self) -> f64 {
        self.efficiencies.qback
    }

    #[getter]
    fn get_gsca(&self) -> f64 {
        self.efficiencies.asymmetry
    }

    #[getter]
    fn get_csca(&self) -> f64 {
        self.cross_sections.csca
    }

    #[getter]
    fn get_cext(&self) -> f64 {
        self.cross_sections.cext
    }

    #[getter]
    fn get_theta(&self) -> Vec<f64> {
        self.thetas().to_vec()
    }

    #[pyo3(name = "natural")]
    fn py_natural(&self) -> Vec<f64> {
        self.natural().to_vec()
    }

    #[pyo3(name = "perpendicular")]
    fn py_perpendicular(&self) -> Vec<f64> {
        self.perpendicular().to_vec()
    }

    #[pyo3(name = "parallel")]
    fn py_parallel(&self) -> Vec<f64> {
        self.parallel().to_vec()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScatteringResult(x={}, m={}, qext={:.6}, qsca={:.6}, qback={:.6}, gsca={:.6})",
            self.request.size_parameter,
            self.request.refr_index,
            self.efficiencies.qext,
            self.efficiencies.qsca,
            self.efficiencies.qback,
            self.efficiencies.asymmetry
        )
    }
}

impl fmt::Display for ScatteringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mie Result:")?;
        writeln!(f, "  Size Parameter:   {:.6}", self.request.size_parameter)?;
        writeln!(
            f,
            "  Refractive Index: {:.6} + {:.6}i",
            self.request.refr_index.re, self.request.refr_index.im
        )?;
        writeln!(f, "  Angles:           {}", self.s1.len())?;
        writeln!(f, "  Terms:            {}", self.terms.nstop)?;
        write!(f, "{}", self.efficiencies)?;
        if self.request.diameter.is_some() {
            write!(f, "{}", self.cross_sections)?;
        }
        Ok(())
    }
}
