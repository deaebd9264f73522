//! In-memory model field containers.
//!
//! This module defines the bundle of named arrays the diagnostics consume,
//! along with the cross-field consistency checks that every component relies
//! on downstream.

use ndarray::{Array2, Array3, Array4};

use crate::error::{CamdiagError, Result};

/// The input fields of one diagnostic run.
///
/// Gridded fields are (time, level, lat, lon) in increasing-altitude order;
/// the hybrid coefficient sequences are kept in raw file order (model top
/// first) because the pressure reconstructor owns the level-axis reversal.
#[derive(Debug, Clone)]
pub struct ModelFields {
    /// Surface pressure (time, lat, lon) [Pa]
    pub surface_pressure: Array3<f64>,
    /// Scalar reference pressure [Pa]
    pub reference_pressure: f64,
    /// Midpoint-level hybrid a coefficients, model top first
    pub hyam: Vec<f64>,
    /// Midpoint-level hybrid b coefficients, model top first
    pub hybm: Vec<f64>,
    /// Interface-level hybrid a coefficients, model top first
    pub hyai: Vec<f64>,
    /// Interface-level hybrid b coefficients, model top first
    pub hybi: Vec<f64>,
    /// Temperature on midpoint levels [K]
    pub temperature: Array4<f64>,
    /// Specific humidity on midpoint levels [kg/kg]
    pub specific_humidity: Array4<f64>,
    /// Geopotential height of layer centers [m]
    pub midpoint_height: Array4<f64>,
    /// Surface geopotential height (lat, lon) [m]
    pub surface_height: Array2<f64>,
}

impl ModelFields {
    /// Validate that all fields describe one consistent grid.
    ///
    /// Checks coefficient lengths (interfaces carry exactly one more level
    /// than midpoints), identical shapes for the rank-4 fields, and matching
    /// time/horizontal dimensions for the surface fields.
    pub fn validate(&self) -> Result<()> {
        if self.hyam.len() != self.hybm.len() {
            return Err(CamdiagError::ShapeMismatch {
                message: format!(
                    "midpoint coefficient lengths differ: hyam has {}, hybm has {}",
                    self.hyam.len(),
                    self.hybm.len()
                ),
            });
        }
        if self.hyai.len() != self.hybi.len() {
            return Err(CamdiagError::ShapeMismatch {
                message: format!(
                    "interface coefficient lengths differ: hyai has {}, hybi has {}",
                    self.hyai.len(),
                    self.hybi.len()
                ),
            });
        }
        if self.hyai.len() != self.hyam.len() + 1 {
            return Err(CamdiagError::ShapeMismatch {
                message: format!(
                    "expected {} interface coefficients for {} midpoint levels, got {}",
                    self.hyam.len() + 1,
                    self.hyam.len(),
                    self.hyai.len()
                ),
            });
        }

        let dim = self.temperature.dim();
        for (name, shape) in [
            ("specific humidity", self.specific_humidity.dim()),
            ("midpoint height", self.midpoint_height.dim()),
        ] {
            if shape != dim {
                return Err(CamdiagError::ShapeMismatch {
                    message: format!(
                        "{} has shape {:?} but temperature has shape {:?}",
                        name, shape, dim
                    ),
                });
            }
        }

        let (ntime, nlev, nlat, nlon) = dim;
        if nlev != self.hyam.len() {
            return Err(CamdiagError::ShapeMismatch {
                message: format!(
                    "gridded fields have {} levels but {} midpoint coefficients were supplied",
                    nlev,
                    self.hyam.len()
                ),
            });
        }
        if self.surface_pressure.dim() != (ntime, nlat, nlon) {
            return Err(CamdiagError::ShapeMismatch {
                message: format!(
                    "surface pressure has shape {:?} but the grid is {:?}",
                    self.surface_pressure.shape(),
                    (ntime, nlat, nlon)
                ),
            });
        }
        if self.surface_height.dim() != (nlat, nlon) {
            return Err(CamdiagError::ShapeMismatch {
                message: format!(
                    "surface height has shape {:?} but the grid is {} x {}",
                    self.surface_height.shape(),
                    nlat,
                    nlon
                ),
            });
        }

        Ok(())
    }

    /// Grid dimensions as (time, level, lat, lon).
    pub fn grid_dim(&self) -> (usize, usize, usize, usize) {
        self.temperature.dim()
    }
}
