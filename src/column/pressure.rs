//! Pressure reconstruction on hybrid sigma-pressure levels.
//!
//! Model output stores no 3-D pressure field; it stores a surface pressure
//! map plus two per-level coefficient sequences `a` and `b` such that the
//! pressure on level `i` is `a[i]*p0 + b[i]*ps`. Coefficients are supplied
//! in file order, model top first, and the reconstructed field is returned
//! with the level axis flipped so that increasing index means increasing
//! altitude and decreasing pressure.

use ndarray::{Array4, ArrayView3, ArrayViewD, Axis, Ix3, Zip};

use super::common::ensure_all_finite;
use crate::error::{CamdiagError, Result};

/// Reconstruct the rank-4 (time, level, lat, lon) pressure field in pascals.
///
/// `ps` is surface pressure, rank 2 (lat, lon) or rank 3 (time, lat, lon); a
/// rank-2 field is treated as a single time step and yields results
/// identical to the same field wrapped in a length-1 time axis. `p0` is the
/// scalar reference pressure. `a` and `b` are the hybrid coefficients for
/// the requested levels (midpoints or interfaces), model top first.
///
/// The raw sequence `a[i]*p0 + b[i]*ps` must be strictly increasing toward
/// the surface for every grid point; coefficient sequences supplied in the
/// opposite order are rejected rather than silently producing a misordered
/// field.
pub fn hybrid_level_pressure(
    ps: ArrayViewD<'_, f64>,
    p0: f64,
    a: &[f64],
    b: &[f64],
) -> Result<Array4<f64>> {
    if a.len() != b.len() {
        return Err(CamdiagError::ShapeMismatch {
            message: format!(
                "hybrid coefficient lengths differ: a has {}, b has {}",
                a.len(),
                b.len()
            ),
        });
    }
    if a.is_empty() {
        return Err(CamdiagError::ShapeMismatch {
            message: "hybrid coefficient sequences are empty".to_string(),
        });
    }

    let ps3 = promote_surface_pressure(&ps)?;

    if !(p0 > 0.0) {
        return Err(CamdiagError::InvalidPhysicalState {
            message: format!("reference pressure must be positive, got {}", p0),
        });
    }
    if ps3.iter().any(|&v| v <= 0.0) {
        return Err(CamdiagError::InvalidPhysicalState {
            message: "surface pressure must be positive everywhere".to_string(),
        });
    }

    validate_coefficient_ordering(p0, a, b, &ps3)?;

    let (ntime, nlat, nlon) = ps3.dim();
    let nlev = a.len();
    let mut pressure = Array4::<f64>::zeros((ntime, nlev, nlat, nlon));

    // Each raw level i (model top first) lands in output slot nlev-1-i so
    // that pressure decreases with increasing level index.
    for (i, (&ai, &bi)) in a.iter().zip(b.iter()).enumerate() {
        let mut level = pressure.index_axis_mut(Axis(1), nlev - 1 - i);
        Zip::from(&mut level)
            .and(&ps3)
            .for_each(|dst, &sp| *dst = ai * p0 + bi * sp);
    }

    ensure_all_finite("reconstructed pressure", &pressure.view())?;
    Ok(pressure)
}

/// Promote a rank-2 surface pressure field to a single-time rank-3 view.
fn promote_surface_pressure<'a>(ps: &ArrayViewD<'a, f64>) -> Result<ArrayView3<'a, f64>> {
    let view = match ps.ndim() {
        2 => ps.clone().insert_axis(Axis(0)),
        3 => ps.clone(),
        n => {
            return Err(CamdiagError::ShapeMismatch {
                message: format!("surface pressure must be rank 2 or 3, got rank {}", n),
            });
        }
    };

    view.into_dimensionality::<Ix3>()
        .map_err(|e| CamdiagError::ShapeMismatch {
            message: format!("surface pressure has an invalid shape: {}", e),
        })
}

/// Require the raw hybrid pressure sequence to increase toward the surface.
///
/// The per-level pressure is linear in surface pressure, so checking the
/// minimum and maximum of the field bounds every grid point.
fn validate_coefficient_ordering(
    p0: f64,
    a: &[f64],
    b: &[f64],
    ps: &ArrayView3<f64>,
) -> Result<()> {
    let ps_min = ps.iter().fold(f64::INFINITY, |m, &v| m.min(v));
    let ps_max = ps.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));

    for k in 1..a.len() {
        let da = a[k] - a[k - 1];
        let db = b[k] - b[k - 1];
        for ps_ref in [ps_min, ps_max] {
            if !(da * p0 + db * ps_ref > 0.0) {
                return Err(CamdiagError::InvalidPhysicalState {
                    message: format!(
                        "hybrid coefficients are not ordered from model top to surface: \
                         pressure does not increase between raw levels {} and {}",
                        k - 1,
                        k
                    ),
                });
            }
        }
    }
    Ok(())
}
