//! Common validation helpers for the column diagnostics.
//!
//! This module provides the shared entry/exit checks used by the individual
//! reconstruction and integration routines.

use ndarray::{ArrayView, ArrayView2, ArrayView4, Dimension};

use crate::error::{CamdiagError, Result};

/// Check that two rank-4 fields have identical shapes.
pub fn ensure_same_shape(
    name_a: &str,
    a: &ArrayView4<f64>,
    name_b: &str,
    b: &ArrayView4<f64>,
) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(CamdiagError::ShapeMismatch {
            message: format!(
                "{} has shape {:?} but {} has shape {:?}",
                name_a,
                a.shape(),
                name_b,
                b.shape()
            ),
        });
    }
    Ok(())
}

/// Check that a surface field matches the horizontal dimensions of a grid.
pub fn ensure_surface_grid(
    name: &str,
    surface: &ArrayView2<f64>,
    nlat: usize,
    nlon: usize,
) -> Result<()> {
    if surface.dim() != (nlat, nlon) {
        return Err(CamdiagError::ShapeMismatch {
            message: format!(
                "{} has shape {:?} but the grid is {} x {}",
                name,
                surface.shape(),
                nlat,
                nlon
            ),
        });
    }
    Ok(())
}

/// Check that every value of an output field is finite.
pub fn ensure_all_finite<D: Dimension>(name: &str, values: &ArrayView<f64, D>) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CamdiagError::NumericAnomaly {
            message: format!("{} contains non-finite values", name),
        })
    }
}
