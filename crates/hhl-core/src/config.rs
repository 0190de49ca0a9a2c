//! Pipeline configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with HHL_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HhlError, HhlResult};

/// Widest clock register accepted; the statevector doubles per qubit.
pub const MAX_CLOCK_BITS: u32 = 8;

/// Numerical settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Default clock register width for scenarios that do not set one.
    #[serde(default = "default_clock_bits")]
    pub clock_bits: u32,

    /// Amplitudes at or below this magnitude are ignored by verification.
    #[serde(default = "default_amplitude_threshold")]
    pub amplitude_threshold: f64,

    /// Absolute tolerance between classical and quantum ratios.
    #[serde(default = "default_verify_tolerance")]
    pub verify_tolerance: f64,

    /// Entrywise tolerance for `A = A†`.
    #[serde(default = "default_numeric_tolerance")]
    pub hermitian_tolerance: f64,

    /// Allowed eigen-residual and orthonormality error.
    #[serde(default = "default_numeric_tolerance")]
    pub eigen_tolerance: f64,

    /// Allowed `|U·U† − I|` entry.
    #[serde(default = "default_numeric_tolerance")]
    pub unitary_tolerance: f64,
}

fn default_clock_bits() -> u32 {
    2
}

fn default_amplitude_threshold() -> f64 {
    0.001
}

fn default_verify_tolerance() -> f64 {
    1e-4
}

fn default_numeric_tolerance() -> f64 {
    1e-9
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clock_bits: default_clock_bits(),
            amplitude_threshold: default_amplitude_threshold(),
            verify_tolerance: default_verify_tolerance(),
            hermitian_tolerance: default_numeric_tolerance(),
            eigen_tolerance: default_numeric_tolerance(),
            unitary_tolerance: default_numeric_tolerance(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HhlResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HhlError::Config(format!("{}: {e}", path.display())))?;

        let config: PipelineConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| HhlError::Config(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> HhlResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => PipelineConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set and parse cleanly override the current
    /// values.
    fn merge_env(mut self) -> Self {
        if let Ok(v) = std::env::var("HHL_CLOCK_BITS") {
            if let Ok(val) = v.parse() {
                self.clock_bits = val;
            }
        }
        if let Ok(v) = std::env::var("HHL_AMPLITUDE_THRESHOLD") {
            if let Ok(val) = v.parse() {
                self.amplitude_threshold = val;
            }
        }
        if let Ok(v) = std::env::var("HHL_VERIFY_TOLERANCE") {
            if let Ok(val) = v.parse() {
                self.verify_tolerance = val;
            }
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HhlResult<()> {
        validate_clock_bits(self.clock_bits)?;

        let positive = [
            ("amplitude_threshold", self.amplitude_threshold),
            ("verify_tolerance", self.verify_tolerance),
            ("hermitian_tolerance", self.hermitian_tolerance),
            ("eigen_tolerance", self.eigen_tolerance),
            ("unitary_tolerance", self.unitary_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HhlError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// The rotation stage wires clock bits 0 and 1, so at least two are needed.
pub(crate) fn validate_clock_bits(clock_bits: u32) -> HhlResult<()> {
    if !(2..=MAX_CLOCK_BITS).contains(&clock_bits) {
        return Err(HhlError::InvalidInput(format!(
            "clock register must have 2..={MAX_CLOCK_BITS} qubits, got {clock_bits}"
        )));
    }
    Ok(())
}
