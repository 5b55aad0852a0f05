//! Writers for solver results.
//!
//! Produces whitespace separated tables of the amplitudes and Mueller matrix
//! elements against scattering angle, and a JSON summary of the integral
//! parameters.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::result::ScatteringResult;


pub const AMPLITUDES_FILE: &str = "amplitudes";
pub const MUELLER_FILE: &str = "mueller_1d";
pub const RESULTS_FILE: &str = "results.json";

/// JSON summary of a solve.
#[derive(Debug, Serialize)]
#[allow(non_snake_case)]
struct ResultsDocument {
    phaseFct_S1: Vec<[f64; 2]>,
    phaseFct_S2: Vec<[f64; 2]>,
    extinction_efficiency: f64,
    scattering_efficiency: f64,
    backscatter_efficiency: f64,
    asymmetry_parameter: f64,
    scattering_crosssection: f64,
    extinction_crosssection: f64,
}

impl From<&ScatteringResult> for ResultsDocument {
    fn from(result: &ScatteringResult) -> Self {
        let eff = result.efficiencies();
        let cs = result.cross_sections();
        Self {
            phaseFct_S1: result.s1().iter().map(|s| [s.re, s.im]).collect(),
            phaseFct_S2: result.s2().iter().map(|s| [s.re, s.im]).collect(),
            extinction_efficiency: eff.qext,
            scattering_efficiency: eff.qsca,
            backscatter_efficiency: eff.qback,
            asymmetry_parameter: eff.asymmetry,
            scattering_crosssection: cs.csca,
            extinction_crosssection: cs.cext,
        }
    }
}

/// Write all output files for `result` into `directory`, creating it if needed.
pub fn writeup(result: &ScatteringResult, directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {:?}", directory))?;
    write_amplitudes(result, directory)?;
    write_mueller_1d(result, directory)?;
    write_result(result, directory)?;
    Ok(())
}

/// Write S1, S2 and the three intensities against scattering angle in degrees.
pub fn write_amplitudes(result: &ScatteringResult, directory: &Path) -> Result<()> {
    let path = directory.join(AMPLITUDES_FILE);
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    let thetas = result.thetas();
    let natural = result.natural();
    let perpendicular = result.perpendicular();
    let parallel = result.parallel();

    for (index, theta) in thetas.iter().enumerate() {
        let s1 = result.s1()[index];
        let s2 = result.s2()[index];
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {}",
            theta.to_degrees(),
            s1.re,
            s1.im,
            s2.re,
            s2.im,
            natural[index],
            perpendicular[index],
            parallel[index]
        )?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the Mueller matrix elements S11, S12, S33, S34 against scattering angle in degrees.
pub fn write_mueller_1d(result: &ScatteringResult, directory: &Path) -> Result<()> {
    let path = directory.join(MUELLER_FILE);
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    let mueller = result.mueller();
    for (row, theta) in mueller.outer_iter().zip(result.thetas().iter()) {
        write!(writer, "{}", theta.to_degrees())?;
        for value in row.iter() {
            write!(writer, " {}", value)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the JSON summary of amplitudes, efficiencies and cross sections.
pub fn write_result(result: &ScatteringResult, directory: &Path) -> Result<()> {
    let path = directory.join(RESULTS_FILE);
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &ResultsDocument::from(result))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
