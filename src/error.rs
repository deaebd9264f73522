//! Error types for the camdiag application.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the application, from array-shape disagreements to
//! physically invalid input states.

use thiserror::Error;

/// The main error type for camdiag operations.
#[derive(Error, Debug)]
pub enum CamdiagError {
    /// NetCDF file operation errors
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Inconsistent array ranks or dimensions among inputs
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Input that violates the physical assumptions of a computation,
    /// e.g. non-positive density or pressure increasing with altitude
    #[error("Invalid physical state: {message}")]
    InvalidPhysicalState { message: String },

    /// Non-finite values detected in an output that should be finite
    #[error("Numeric anomaly: {message}")]
    NumericAnomaly { message: String },
}

/// Convenience type alias for Results with CamdiagError
pub type Result<T> = std::result::Result<T, CamdiagError>;
