//! Interface heights by geometric midpoint interpolation.
//!
//! Estimates the height of each layer boundary from the heights of the
//! adjoining layer centers, anchored at the surface. This is the reference
//! method the hydrostatic integration is validated against; it uses no
//! pressure or density information.

use ndarray::{s, Array4, ArrayView2, ArrayView4, Axis, Zip};

use super::common::{ensure_all_finite, ensure_surface_grid};
use crate::error::{CamdiagError, Result};

/// Estimate interface geopotential heights from layer-center heights.
///
/// `center_height` is rank 4 (time, level, lat, lon) in meters, ordered by
/// increasing altitude; `surface_height` is rank 2 (lat, lon) and is
/// broadcast over time. The output has one more level than the input:
/// interface 0 is the surface height, interior interface `k` is the midpoint
/// of centers `k-1` and `k`, and the model-top interface reflects the top
/// layer's half-thickness above its center.
pub fn midpoint_interface_heights(
    center_height: ArrayView4<'_, f64>,
    surface_height: ArrayView2<'_, f64>,
) -> Result<Array4<f64>> {
    let (ntime, nlev, nlat, nlon) = center_height.dim();
    if nlev == 0 {
        return Err(CamdiagError::ShapeMismatch {
            message: "layer-center heights have no levels".to_string(),
        });
    }
    ensure_surface_grid("surface height", &surface_height, nlat, nlon)?;

    let mut interface = Array4::<f64>::zeros((ntime, nlev + 1, nlat, nlon));

    // Surface boundary condition.
    for t in 0..ntime {
        interface
            .slice_mut(s![t, 0, .., ..])
            .assign(&surface_height);
    }

    // Interior interfaces: midpoint of the two adjoining layer centers.
    for k in 1..nlev {
        let upper = center_height.index_axis(Axis(1), k);
        let lower = center_height.index_axis(Axis(1), k - 1);
        let mut dst = interface.index_axis_mut(Axis(1), k);
        Zip::from(&mut dst)
            .and(&upper)
            .and(&lower)
            .for_each(|d, &u, &l| *d = 0.5 * (u + l));
    }

    // Model top: reflect the top layer's half-thickness above its center.
    let below = interface.index_axis(Axis(1), nlev - 1).to_owned();
    let top_center = center_height.index_axis(Axis(1), nlev - 1);
    let mut top = interface.index_axis_mut(Axis(1), nlev);
    Zip::from(&mut top)
        .and(&top_center)
        .and(&below)
        .for_each(|d, &c, &b| *d = c + (c - b));

    ensure_all_finite("midpoint interface heights", &interface.view())?;
    Ok(interface)
}
