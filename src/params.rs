//! Integral scattering parameters of a sphere.
//!
//! Efficiencies are dimensionless cross sections normalised by the geometric
//! cross section `pi r^2`. Cross sections are only meaningful when the
//! physical diameter of the sphere is known.

use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_efficiencies() {
        let eff = Efficiencies {
            qext: 2.0,
            qsca: 1.5,
            qback: 0.4,
            asymmetry: 0.7,
        };
        assert!((eff.qabs() - 0.5).abs() < 1e-15);
        assert!((eff.albedo() - 0.75).abs() < 1e-15);
    }

    #[test]
    fn cross_sections_scale_with_area() {
        let eff = Efficiencies {
            qext: 2.0,
            qsca: 1.0,
            qback: 0.5,
            asymmetry: 0.0,
        };
        let cs = CrossSections::from_efficiencies(&eff, Some(2.0));
        assert!((cs.cext - 2.0 * PI).abs() < 1e-12);
        assert!((cs.csca - PI).abs() < 1e-12);
        assert!((cs.cabs() - PI).abs() < 1e-12);
        assert!((cs.cback - 0.5 * PI).abs() < 1e-12);

        let cs = CrossSections::from_efficiencies(&eff, None);
        assert_eq!(cs, CrossSections::default());
    }
}

/// Extinction, scattering and backscatter efficiencies and the asymmetry parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Efficiencies {
    pub qext: f64,
    pub qsca: f64,
    pub qback: f64,
    /// Mean cosine of the scattering angle.
    pub asymmetry: f64,
}

impl Efficiencies {
    /// Absorption efficiency.
    pub fn qabs(&self) -> f64 {
        self.qext - self.qsca
    }

    /// Single-scattering albedo.
    pub fn albedo(&self) -> f64 {
        self.qsca / self.qext
    }
}

/// Cross sections in squared units of the sphere diameter. All zero when no
/// diameter was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CrossSections {
    pub cext: f64,
    pub csca: f64,
    pub cback: f64,
}

impl CrossSections {
    pub fn from_efficiencies(eff: &Efficiencies, diameter: Option<f64>) -> Self {
        match diameter {
            Some(d) => {
                let area = PI * (d / 2.0).powi(2);
                Self {
                    cext: eff.qext * area,
                    csca: eff.qsca * area,
                    cback: eff.qback * area,
                }
            }
            None => Self::default(),
        }
    }

    pub fn cabs(&self) -> f64 {
        self.cext - self.csca
    }
}

impl fmt::Display for Efficiencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Efficiencies:")?;
        writeln!(f, "  Extinction:       {:.6}", self.qext)?;
        writeln!(f, "  Scattering:       {:.6}", self.qsca)?;
        writeln!(f, "  Absorption:       {:.6}", self.qabs())?;
        writeln!(f, "  Backscatter:      {:.6}", self.qback)?;
        writeln!(f, "  Asymmetry:        {:.6}", self.asymmetry)?;
        writeln!(f, "  Albedo:           {:.6}", self.albedo())
    }
}

impl fmt::Display for CrossSections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cross Sections:")?;
        writeln!(f, "  Extinction:       {:.6e}", self.cext)?;
        writeln!(f, "  Scattering:       {:.6e}", self.csca)?;
        writeln!(f, "  Absorption:       {:.6e}", self.cabs())?;
        writeln!(f, "  Backscatter:      {:.6e}", self.cback)
    }
}
