//! # camdiag
//!
//! Atmospheric-column diagnostics for hybrid sigma-pressure model output.
//!
//! This library reconstructs physical pressure, moist-air density, and
//! interface geopotential height from a model's native hybrid vertical
//! coordinate, and validates the coordinate transform by comparing two
//! independent derivations of interface height: geometric interpolation of
//! layer-center heights, and integration of the hydrostatic balance through
//! pressure and density.
//!
//! ## Key Features
//!
//! - **Hybrid-coordinate pressure reconstruction**: `p = a*p0 + b*ps` per
//!   level, with hardened validation of the coefficient ordering
//! - **Moist-air thermodynamics**: virtual temperature and density
//! - **Two interface-height estimates**: midpoint interpolation and
//!   hydrostatic integration, plus agreement statistics between them
//!
//! ## Architecture
//!
//! - **Data Layer**: loads model output fields into memory (`reader`,
//!   `fields`)
//! - **Core**: pure array-to-array column diagnostics (`column`)
//! - **Analysis**: the end-to-end pipeline and its summary (`analysis`)

pub mod analysis;
pub mod column;
pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod logging;
#[cfg(feature = "netcdf")]
pub mod reader;

pub use analysis::{diagnose, ColumnDiagnostics};
pub use column::AgreementStats;
pub use config::Config;
pub use error::{CamdiagError, Result};
pub use fields::ModelFields;
pub use logging::{init_tracing, log_error, log_field_load_stats, log_timed_operation};
