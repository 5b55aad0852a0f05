//! The Bohren-Huffman Mie solver.
//!
//! Computes the scattering amplitudes S1 and S2 of a homogeneous sphere and
//! its extinction, scattering and backscatter efficiencies and asymmetry
//! parameter. The Riccati-Bessel functions of the real argument `x` are
//! generated by upward recursion, while the logarithmic derivative of the
//! internal field, which is unstable upwards, is generated by downward
//! recursion from a zero seed well above the last term needed.
//!
//! # Reference
//! Bohren & Huffman, *Absorption and Scattering of Light by Small Particles* (1983), Appendix A.

use ndarray::Array1;
use num_complex::Complex64;
use tracing::{debug, trace};

use crate::bins;
use crate::error::MieError;
use crate::params::{CrossSections, Efficiencies};
use crate::request::ScatteringRequest;
use crate::result::ScatteringResult;
use crate::terms::TermCounts;


/// Logarithmic derivative `D_n(y) = psi_n'(y) / psi_n(y)` for `n = 1..=nmx`.
///
/// Element `k` holds `D_{k+1}`. The last element is the zero seed and every
/// other element follows from the downward recurrence
/// `D_{n-1} = n/y - 1/(D_n + n/y)`.
pub fn log_derivative(y: Complex64, nmx: usize) -> Vec<Complex64> {
    let mut d = vec![Complex64::new(0.0, 0.0); nmx];
    for n in (1..nmx).rev() {
        let en = (n + 1) as f64 / y;
        d[n - 1] = en - 1.0 / (d[n] + en);
    }
    d
}

/// Solves the Mie problem described by `request`.
///
/// The angle count is clamped up to 2 if smaller. Returns an error without
/// attempting any recursion if the request is invalid, or if the series would
/// need more terms than the solver supports.
pub fn solve(request: &ScatteringRequest) -> Result<ScatteringResult, MieError> {
    let num_angles = request.validate()?;
    let x = request.size_parameter;
    let m = request.refr_index;
    let terms = TermCounts::estimate(x, m)?;

    debug!(x, %m, num_angles, nstop = terms.nstop, nmx = terms.nmx, "solving");

    // must be complete before the upward recursion reads it
    let d = log_derivative(m * x, terms.nmx);

    let amu = bins::cosines(num_angles);
    let mut pi0 = Array1::<f64>::zeros(num_angles);
    let mut pi1 = Array1::<f64>::ones(num_angles);

    let zero = Complex64::new(0.0, 0.0);
    let mut s1_fwd = Array1::from_elem(num_angles, zero);
    let mut s2_fwd = Array1::from_elem(num_angles, zero);
    let mut s1_bwd = Array1::from_elem(num_angles, zero);
    let mut s2_bwd = Array1::from_elem(num_angles, zero);

    let mut an_all = Vec::with_capacity(terms.nstop);
    let mut bn_all = Vec::with_capacity(terms.nstop);

    // psi_{n-2}, psi_{n-1}, chi_{n-2}, chi_{n-1}, xi_{n-1}
    let mut psi0 = x.cos();
    let mut psi1 = x.sin();
    let mut chi0 = -x.sin();
    let mut chi1 = x.cos();
    let mut xi1 = Complex64::new(psi1, -chi1);

    let mut qsca_sum = 0.0;
    let mut g_sum = 0.0;
    let mut prev: Option<(Complex64, Complex64)> = None;

    for n in 1..=terms.nstop {
        let en = n as f64;
        let fn_ = (2.0 * en + 1.0) / (en * (en + 1.0));

        let psi = (2.0 * en - 1.0) * psi1 / x - psi0;
        let chi = (2.0 * en - 1.0) * chi1 / x - chi0;
        let xi = Complex64::new(psi, -chi);

        let dn = d[n - 1];
        let da = dn / m + en / x;
        let db = m * dn + en / x;
        let an = (da * psi - psi1) / (da * xi - xi1);
        let bn = (db * psi - psi1) / (db * xi - xi1);

        qsca_sum += (2.0 * en + 1.0) * (an.norm_sqr() + bn.norm_sqr());
        g_sum += fn_ * (an.re * bn.re + an.im * bn.im);
        if let Some((an1, bn1)) = prev {
            g_sum += ((en - 1.0) * (en + 1.0) / en)
                * (an1.re * an.re + an1.im * an.im + bn1.re * bn.re + bn1.im * bn.im);
        }

        // +1 for odd n, -1 for even n
        let p = if n % 2 == 1 { 1.0 } else { -1.0 };
        for j in 0..num_angles {
            let pi = pi1[j];
            let tau = en * amu[j] * pi - (en + 1.0) * pi0[j];

            s1_fwd[j] += fn_ * (an * pi + bn * tau);
            s2_fwd[j] += fn_ * (an * tau + bn * pi);
            // pi_n(-mu) = (-1)^(n+1) pi_n(mu), tau_n(-mu) = (-1)^n tau_n(mu)
            s1_bwd[j] += fn_ * p * (an * pi - bn * tau);
            s2_bwd[j] += fn_ * p * (bn * pi - an * tau);

            pi1[j] = ((2.0 * en + 1.0) * amu[j] * pi - (en + 1.0) * pi0[j]) / en;
            pi0[j] = pi;
        }

        psi0 = psi1;
        psi1 = psi;
        chi0 = chi1;
        chi1 = chi;
        xi1 = Complex64::new(psi1, -chi1);

        prev = Some((an, bn));
        an_all.push(an);
        bn_all.push(bn);
    }

    // backward hemisphere runs 90 -> 180 degrees once reversed, minus the shared 90 degree point
    let s1: Array1<Complex64> = s1_fwd
        .iter()
        .copied()
        .chain(s1_bwd.iter().rev().skip(1).copied())
        .collect();
    let s2: Array1<Complex64> = s2_fwd
        .iter()
        .copied()
        .chain(s2_bwd.iter().rev().skip(1).copied())
        .collect();

    let last = s1.len() - 1;
    let efficiencies = Efficiencies {
        qext: 4.0 / (x * x) * s1[0].re,
        qsca: 2.0 / (x * x) * qsca_sum,
        qback: 4.0 * (s1[last].norm() / x).powi(2),
        // g is normalised by the unscaled sum
        asymmetry: if qsca_sum > 0.0 {
            2.0 * g_sum / qsca_sum
        } else {
            0.0
        },
    };
    let cross_sections = CrossSections::from_efficiencies(&efficiencies, request.diameter);

    trace!(
        qext = efficiencies.qext,
        qsca = efficiencies.qsca,
        qback = efficiencies.qback,
        g = efficiencies.asymmetry,
        "solved"
    );

    Ok(ScatteringResult::new(
        ScatteringRequest {
            num_angles,
            ..*request
        },
        terms,
        s1,
        s2,
        an_all,
        bn_all,
        efficiencies,
        cross_sections,
    ))
}

/// Solves for size parameter `x`, relative refractive index `m` and `nang`
/// angles between 0 and 90 degrees, without a diameter.
pub fn bhmie(x: f64, m: Complex64, nang: usize) -> Result<ScatteringResult, MieError> {
    solve(&ScatteringRequest::new(x, m, nang))
}
