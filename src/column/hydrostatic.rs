//! Interface heights by hydrostatic integration.
//!
//! Integrates the discrete hydrostatic balance `dp/dz = -rho * g` upward
//! from the surface through the interface-pressure field, using each layer's
//! midpoint density for the whole layer. That single-density approximation
//! carries a small systematic bias against the midpoint method, growing
//! toward the model top; it is part of the method's definition and is left
//! intact.

use ndarray::{s, Array4, ArrayView2, ArrayView4, Axis, Zip};

use super::common::{ensure_all_finite, ensure_surface_grid};
use crate::constants::GRAVITY;
use crate::error::{CamdiagError, Result};

/// Integrate interface geopotential heights from density and pressure.
///
/// `surface_height` is rank 2 (lat, lon) in meters, broadcast over time.
/// `density` is rank 4 (time, level, lat, lon) on midpoint levels;
/// `interface_pressure` is rank 4 with one more level, both ordered by
/// increasing altitude. Interface 0 is the surface height; each layer adds
/// `dz = -dp / (rho * g)`.
///
/// The level axis carries a sequential dependency and is traversed in strict
/// increasing order, one vectorized horizontal/time pass per layer.
pub fn hydrostatic_interface_heights(
    surface_height: ArrayView2<'_, f64>,
    density: ArrayView4<'_, f64>,
    interface_pressure: ArrayView4<'_, f64>,
) -> Result<Array4<f64>> {
    let (ntime, nlev, nlat, nlon) = density.dim();
    let pi_dim = interface_pressure.dim();
    if pi_dim != (ntime, nlev + 1, nlat, nlon) {
        return Err(CamdiagError::ShapeMismatch {
            message: format!(
                "interface pressure has shape {:?} but density {:?} requires {:?}",
                pi_dim,
                density.dim(),
                (ntime, nlev + 1, nlat, nlon)
            ),
        });
    }
    if nlev == 0 {
        return Err(CamdiagError::ShapeMismatch {
            message: "density field has no levels".to_string(),
        });
    }
    ensure_surface_grid("surface height", &surface_height, nlat, nlon)?;

    if density.iter().any(|&rho| !(rho > 0.0)) {
        return Err(CamdiagError::InvalidPhysicalState {
            message: "density must be positive everywhere".to_string(),
        });
    }

    let mut interface = Array4::<f64>::zeros((ntime, nlev + 1, nlat, nlon));
    for t in 0..ntime {
        interface
            .slice_mut(s![t, 0, .., ..])
            .assign(&surface_height);
    }

    for k in 0..nlev {
        let p_below = interface_pressure.index_axis(Axis(1), k);
        let p_above = interface_pressure.index_axis(Axis(1), k + 1);

        // Pressure must drop across every layer; a non-negative difference
        // invalidates the balance equation.
        if p_above.iter().zip(p_below.iter()).any(|(&hi, &lo)| hi >= lo) {
            return Err(CamdiagError::InvalidPhysicalState {
                message: format!(
                    "interface pressure does not decrease across layer {}",
                    k
                ),
            });
        }

        let rho = density.index_axis(Axis(1), k);
        let (lower, mut upper) = interface.view_mut().split_at(Axis(1), k + 1);
        let below = lower.index_axis(Axis(1), k);
        let mut dst = upper.index_axis_mut(Axis(1), 0);
        Zip::from(&mut dst)
            .and(&below)
            .and(&p_above)
            .and(&p_below)
            .and(&rho)
            .for_each(|d, &zb, &pa, &pb, &r| *d = zb - (pa - pb) / (r * GRAVITY));
    }

    ensure_all_finite("hydrostatic interface heights", &interface.view())?;
    Ok(interface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array4};

    fn column_case(
        zs: f64,
        rho: &[f64],
        pi: &[f64],
    ) -> (Array2<f64>, Array4<f64>, Array4<f64>) {
        let nlev = rho.len();
        let surface = Array2::from_elem((1, 1), zs);
        let mut density = Array4::<f64>::zeros((1, nlev, 1, 1));
        let mut pressure = Array4::<f64>::zeros((1, nlev + 1, 1, 1));
        for (k, &r) in rho.iter().enumerate() {
            density[[0, k, 0, 0]] = r;
        }
        for (k, &p) in pi.iter().enumerate() {
            pressure[[0, k, 0, 0]] = p;
        }
        (surface, density, pressure)
    }

    #[test]
    fn test_two_layer_literal() {
        let (zs, rho, pi) = column_case(0.0, &[1.2, 1.0], &[101_325.0, 90_000.0, 80_000.0]);
        let zi = hydrostatic_interface_heights(zs.view(), rho.view(), pi.view()).unwrap();

        let z1 = 11_325.0 / (1.2 * GRAVITY);
        let z2 = z1 + 10_000.0 / (1.0 * GRAVITY);
        assert_eq!(zi.dim(), (1, 3, 1, 1));
        assert!((zi[[0, 0, 0, 0]] - 0.0).abs() < 1e-12);
        assert!((zi[[0, 1, 0, 0]] - z1).abs() < 1e-9);
        assert!((zi[[0, 2, 0, 0]] - z2).abs() < 1e-9);
        // Values from the balance equation directly.
        assert!((z1 - 962.352269).abs() < 1e-5);
        assert!((z2 - 1982.063283).abs() < 1e-5);
    }

    #[test]
    fn test_starts_from_surface_height() {
        let (zs, rho, pi) = column_case(812.5, &[1.1], &[92_000.0, 85_000.0]);
        let zi = hydrostatic_interface_heights(zs.view(), rho.view(), pi.view()).unwrap();
        assert_eq!(zi[[0, 0, 0, 0]], 812.5);
        assert!(zi[[0, 1, 0, 0]] > 812.5);
    }

    #[test]
    fn test_heights_strictly_increasing() {
        let nlev = 12;
        let surface = Array2::from_elem((2, 3), 100.0);
        let density = Array4::from_shape_fn((2, nlev, 2, 3), |(_, k, _, _)| {
            1.2 * (1.0 - 0.06 * k as f64)
        });
        let pressure = Array4::from_shape_fn((2, nlev + 1, 2, 3), |(_, k, j, i)| {
            101_000.0 * (1.0 - 0.05 * k as f64) + 20.0 * (j + i) as f64
        });

        let zi =
            hydrostatic_interface_heights(surface.view(), density.view(), pressure.view()).unwrap();
        for k in 0..nlev {
            let lower = zi.index_axis(Axis(1), k);
            let upper = zi.index_axis(Axis(1), k + 1);
            assert!(upper.iter().zip(lower.iter()).all(|(&u, &l)| u > l));
        }
    }

    #[test]
    fn test_nonpositive_density_rejected() {
        let (zs, mut rho, pi) = column_case(0.0, &[1.2, 1.0], &[101_325.0, 90_000.0, 80_000.0]);
        rho[[0, 1, 0, 0]] = -0.5;
        let result = hydrostatic_interface_heights(zs.view(), rho.view(), pi.view());
        assert!(matches!(
            result,
            Err(CamdiagError::InvalidPhysicalState { .. })
        ));
    }

    #[test]
    fn test_pressure_increasing_with_altitude_rejected() {
        // Second layer has pressure growing upward.
        let (zs, rho, pi) = column_case(0.0, &[1.2, 1.0], &[101_325.0, 90_000.0, 95_000.0]);
        let result = hydrostatic_interface_heights(zs.view(), rho.view(), pi.view());
        assert!(matches!(
            result,
            Err(CamdiagError::InvalidPhysicalState { .. })
        ));
    }

    #[test]
    fn test_level_count_mismatch_rejected() {
        // Interface pressure must have exactly one more level than density.
        let (zs, rho, _) = column_case(0.0, &[1.2, 1.0], &[101_325.0, 90_000.0, 80_000.0]);
        let pi = Array4::from_shape_fn((1, 2, 1, 1), |(_, k, _, _)| 101_325.0 - 10_000.0 * k as f64);
        let result = hydrostatic_interface_heights(zs.view(), rho.view(), pi.view());
        assert!(matches!(
            result,
            Err(CamdiagError::ShapeMismatch { .. })
        ));
    }
}
