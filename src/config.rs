//! Configuration management for camdiag.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::column::AgreementStats;
use crate::error::{CamdiagError, Result};

/// Command-line arguments for camdiag
#[derive(Parser, Debug)]
#[command(name = "camdiag")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the model output file to diagnose
    pub model_file: PathBuf,

    /// Path to JSON configuration file
    #[arg(short, long, env = "CAMDIAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CAMDIAG_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Print the agreement summary as JSON instead of plain text
    #[arg(long, env = "CAMDIAG_JSON")]
    pub json: bool,
}

/// Agreement tolerances for the height-consistency verdict.
///
/// Defaults are the bounds observed on the reference atmospheric dataset;
/// a run whose statistics exceed them fails the diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Largest acceptable mean relative difference [%]
    #[serde(default = "default_mean_tolerance")]
    pub mean_pct: f64,

    /// Largest acceptable standard deviation of the relative difference [%]
    #[serde(default = "default_std_dev_tolerance")]
    pub std_dev_pct: f64,

    /// Largest acceptable maximum relative difference [%]
    #[serde(default = "default_max_tolerance")]
    pub max_pct: f64,
}

impl ToleranceConfig {
    /// Whether a set of agreement statistics passes these tolerances.
    pub fn accepts(&self, stats: &AgreementStats) -> bool {
        stats.mean_pct.abs() < self.mean_pct
            && stats.std_dev_pct < self.std_dev_pct
            && stats.max_pct < self.max_pct
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    /// Emit the agreement summary as JSON
    #[serde(default)]
    pub json: bool,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Agreement tolerances
    #[serde(default)]
    pub tolerance: ToleranceConfig,

    /// Report output configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Build the configuration from parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.log_level = args.log_level;
        if args.json {
            config.report.json = true;
        }

        Ok((config, args.model_file))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.tolerance = other.tolerance;
        self.report = other.report;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(CamdiagError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        // Tolerances must be positive to be meaningful
        for (name, value) in [
            ("mean_pct", self.tolerance.mean_pct),
            ("std_dev_pct", self.tolerance.std_dev_pct),
            ("max_pct", self.tolerance.max_pct),
        ] {
            if !(value > 0.0) {
                return Err(CamdiagError::Config {
                    message: format!("Tolerance {} must be positive, got {}", name, value),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: ToleranceConfig::default(),
            report: ReportConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            mean_pct: default_mean_tolerance(),
            std_dev_pct: default_std_dev_tolerance(),
            max_pct: default_max_tolerance(),
        }
    }
}

// Default value functions for serde
fn default_mean_tolerance() -> f64 {
    0.69
}

fn default_std_dev_tolerance() -> f64 {
    1.02
}

fn default_max_tolerance() -> f64 {
    6.4
}

fn default_log_level() -> String {
    "info".to_string()
}
