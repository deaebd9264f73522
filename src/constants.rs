//! Physical constants used throughout the column diagnostics.
//!
//! These are process-wide and immutable. Values match the conventions of the
//! model output this crate consumes.

/// Gravitational acceleration [m s^-2].
pub const GRAVITY: f64 = 9.8067;

/// Gas constant for dry air [J kg^-1 K^-1].
pub const R_DRY: f64 = 287.1;

/// Gas constant for water vapor [J kg^-1 K^-1].
pub const R_VAPOR: f64 = 461.5;

/// Ratio of dry-air to water-vapor gas constants (Rd/Rv), dimensionless.
pub const EPSILON: f64 = R_DRY / R_VAPOR;
