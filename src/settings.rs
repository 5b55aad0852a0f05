use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use num_complex::Complex;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config as constants;
use crate::request::ScatteringRequest;


/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Size parameter. Ignored when both `radius` and `wavelength` are set.
    #[serde(default)]
    pub size_parameter: Option<f64>,
    /// Refractive index of the particle as `[re, im]`.
    pub refr_index: Complex<f64>,
    #[serde(default = "default_medium_refr_index")]
    pub medium_refr_index: f64,
    #[serde(default = "default_num_angles")]
    pub num_angles: usize,
    #[serde(default)]
    pub diameter: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    /// Vacuum wavelength, in the same units as `radius`.
    #[serde(default)]
    pub wavelength: Option<f64>,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

fn default_medium_refr_index() -> f64 {
    1.0
}

fn default_num_angles() -> usize {
    constants::DEFAULT_ANGLES
}

fn default_directory() -> PathBuf {
    PathBuf::from("output")
}

impl Settings {
    /// Resolves the settings into a solver request.
    ///
    /// A radius and wavelength pair fixes the size parameter and diameter.
    /// Otherwise the size parameter must be given directly. The particle index
    /// is divided by the medium index in both cases.
    pub fn request(&self) -> Result<ScatteringRequest> {
        match (self.radius, self.wavelength) {
            (Some(radius), Some(wavelength)) => Ok(ScatteringRequest::from_physical(
                radius,
                wavelength,
                self.refr_index,
                self.medium_refr_index,
                self.num_angles,
            )),
            (Some(_), None) | (None, Some(_)) => {
                bail!("radius and wavelength must be given together")
            }
            (None, None) => {
                let x = self
                    .size_parameter
                    .ok_or_else(|| anyhow!("no size parameter, radius or wavelength given"))?;
                let mut request = ScatteringRequest::new(
                    x,
                    self.refr_index / self.medium_refr_index,
                    self.num_angles,
                );
                request.diameter = self.diameter;
                Ok(request)
            }
        }
    }

    fn apply_args(&mut self, args: CliArgs) {
        if let Some(x) = args.x {
            self.size_parameter = Some(x);
        }
        if let Some(ri) = args.ri {
            self.refr_index = ri;
        }
        if let Some(ri0) = args.ri0 {
            self.medium_refr_index = ri0;
        }
        if let Some(n) = args.n {
            self.num_angles = n;
        }
        if let Some(d) = args.d {
            self.diameter = Some(d);
        }
        if let Some(radius) = args.radius {
            self.radius = Some(radius);
        }
        if let Some(wavelength) = args.wavelength {
            self.wavelength = Some(wavelength);
        }
        if let Some(dir) = args.dir {
            self.directory = dir;
        }
    }
}

/// Loads `config/default.toml` without environment or command-line overrides.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let config: Settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("failed to load configuration")?
        .try_deserialize()
        .context("failed to deserialize configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the configuration file, environment variables prefixed with `BHMIE_`,
/// and command-line arguments, later sources overriding earlier ones.
pub fn load_config() -> Result<Settings> {
    load_config_with(CliArgs::parse())
}

pub fn load_config_with(args: CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;
    let config_file = select_config_file(&root);

    let mut config: Settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("bhmie"))
        .build()
        .context("failed to load configuration")?
        .try_deserialize()
        .context("failed to deserialize configuration")?;

    config.apply_args(args);
    validate_config(&config)?;

    Ok(config)
}

/// Use `config/local.toml` if it exists, otherwise `config/default.toml`.
fn select_config_file(root: &Path) -> PathBuf {
    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    if local_config.exists() {
        info!("using local configuration: {:?}", local_config);
        local_config
    } else {
        info!("using default configuration: {:?}", default_config_file);
        default_config_file
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the BHMIE_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("BHMIE_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("could not find project root directory from {:?}", exe_path))
}

fn validate_config(config: &Settings) -> Result<()> {
    if !(config.medium_refr_index > 0.0) {
        bail!(
            "medium refractive index must be greater than 0, got {}",
            config.medium_refr_index
        );
    }
    if let Some(wavelength) = config.wavelength {
        if !(wavelength > 0.0) {
            bail!("wavelength must be greater than 0, got {}", wavelength);
        }
    }
    if let Some(radius) = config.radius {
        if !(radius > 0.0) {
            bail!("radius must be greater than 0, got {}", radius);
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "bhmie - Mie scattering by homogeneous spheres")]
pub struct CliArgs {
    /// Size parameter 2 pi r / lambda.
    #[arg(short = 'x', long = "size-parameter")]
    x: Option<f64>,

    /// The refractive index of the particle, e.g. 1.5+0.01i.
    #[arg(long)]
    ri: Option<Complex<f64>>,

    /// The (real) refractive index of the surrounding medium.
    #[arg(long)]
    ri0: Option<f64>,

    /// Number of angles between 0 and 90 degrees. Values below 2 are raised to 2.
    #[arg(short = 'n', long = "angles")]
    n: Option<usize>,

    /// Particle diameter, used to compute cross sections.
    #[arg(short, long = "diameter")]
    d: Option<f64>,

    /// Particle radius. Together with --wavelength, replaces the size parameter and diameter.
    #[arg(long)]
    radius: Option<f64>,

    /// Vacuum wavelength in the same units as the radius.
    #[arg(short, long)]
    wavelength: Option<f64>,

    /// Output directory.
    #[arg(short = 'o', long)]
    dir: Option<PathBuf>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Size Parameter: {:?}
  - Particle Refractive Index: {:.6} + {:.6}i
  - Medium Refractive Index: {:.6}
  - Angles: {}
  - Diameter: {:?}
  - Radius: {:?}
  - Wavelength: {:?}
  - Output Directory: {:?}
  ",
            self.size_parameter,
            self.refr_index.re,
            self.refr_index.im,
            self.medium_refr_index,
            self.num_angles,
            self.diameter,
            self.radius,
            self.wavelength,
            self.directory,
        )
    }
}
