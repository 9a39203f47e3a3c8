//! TOML plot configuration.
//!
//! ```toml
//! density = 1.5
//!
//! [grid]
//! min = -10.0
//! max = 10.0
//! count = 200
//!
//! [[charges]]
//! x = 0.0
//! y = 0.0
//! q = 1.0
//!
//! [output]
//! path = "field.svg"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::charges::{validate_charges, Charge};
use crate::constants::DEFAULT_DENSITY;
use crate::errors::{FieldError, ValidationError};
use crate::grid::GridSpec;
use crate::math::Scalar;
use crate::plot::FieldPlot;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Values parsed but violate a precondition.
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

/// Output image settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of the rendered figure.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("field.svg"),
            width: 800,
            height: 800,
        }
    }
}

fn default_density() -> Scalar {
    DEFAULT_DENSITY
}

/// Complete description of one field plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Sampling domain.
    #[serde(default)]
    pub grid: GridSpec,
    /// Streamline seeding density.
    #[serde(default = "default_density")]
    pub density: Scalar,
    /// Point charges, in legend precedence order.
    pub charges: Vec<Charge>,
    /// Where and how large to render.
    #[serde(default)]
    pub output: OutputConfig,
}

impl PlotConfig {
    /// Loads and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks charges, grid and density.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_charges(&self.charges)?;
        self.grid.validate()?;
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(ValidationError::InvalidDensity(self.density));
        }
        Ok(())
    }

    /// Builds the plot this configuration describes.
    pub fn build_plot(&self) -> Result<FieldPlot, FieldError> {
        FieldPlot::build(&self.charges, &self.grid, self.density)
    }
}
