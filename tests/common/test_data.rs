//! Test data generation utilities.
//!
//! Builds a synthetic hybrid-coordinate atmosphere with known analytic
//! structure: isothermal and dry, so each column's layer-center height
//! follows `z = H * ln(ps / p) + zs` with scale height `H = Rd * T / g`.
//! Both interface-height methods are then small discretization errors away
//! from the same exact profile, which makes the agreement statistics tight
//! and predictable.

use ndarray::{Array2, Array3, Array4};

use camdiag::constants::{GRAVITY, R_DRY};
use camdiag::ModelFields;

/// Midpoint levels in the synthetic grid.
pub const NLEV: usize = 26;
/// Time steps.
pub const NTIME: usize = 2;
/// Latitude points.
pub const NLAT: usize = 4;
/// Longitude points.
pub const NLON: usize = 5;

/// Reference pressure [Pa].
pub const P0: f64 = 100_000.0;
/// Uniform temperature of the synthetic atmosphere [K].
pub const T0: f64 = 260.0;

/// Hybrid interface coefficients, model top first.
///
/// Pure-pressure levels aloft blend into terrain-following levels at the
/// surface; the 1.4 exponent keeps the uppermost layers thin enough in
/// log-pressure for both height methods to stay close.
pub fn interface_coefficients() -> (Vec<f64>, Vec<f64>) {
    let alpha = 0.03;
    let mut hyai = Vec::with_capacity(NLEV + 1);
    let mut hybi = Vec::with_capacity(NLEV + 1);
    for k in 0..=NLEV {
        let s = (k as f64 / NLEV as f64).powf(1.4);
        hybi.push(s * s);
        hyai.push(alpha + (1.0 - alpha) * s - s * s);
    }
    (hyai, hybi)
}

/// Midpoint coefficients as averages of the adjoining interface values.
pub fn midpoint_coefficients() -> (Vec<f64>, Vec<f64>) {
    let (hyai, hybi) = interface_coefficients();
    let hyam = (0..NLEV).map(|k| 0.5 * (hyai[k] + hyai[k + 1])).collect();
    let hybm = (0..NLEV).map(|k| 0.5 * (hybi[k] + hybi[k + 1])).collect();
    (hyam, hybm)
}

/// Surface height [m]: zero along the first row and column (masked in the
/// comparator), rising terrain elsewhere.
pub fn surface_height() -> Array2<f64> {
    Array2::from_shape_fn((NLAT, NLON), |(j, i)| 250.0 * (j * i) as f64)
}

/// Number of grid points the comparator masks out: the surface interface
/// wherever the terrain height is exactly zero, at every time step.
pub fn masked_point_count() -> usize {
    let zs = surface_height();
    NTIME * zs.iter().filter(|&&v| v == 0.0).count()
}

/// A complete isothermal field bundle for the synthetic grid.
pub fn isothermal_fields() -> ModelFields {
    let (hyai, hybi) = interface_coefficients();
    let (hyam, hybm) = midpoint_coefficients();
    let zs = surface_height();
    let scale_height = R_DRY * T0 / GRAVITY;

    // Surface pressure consistent with the terrain, plus a uniformly
    // perturbed second time step.
    let surface_pressure = Array3::from_shape_fn((NTIME, NLAT, NLON), |(t, j, i)| {
        P0 * (-zs[[j, i]] / scale_height).exp() * (1.0 + 0.01 * t as f64)
    });

    // Layer-center heights from the analytic isothermal profile, in
    // increasing-altitude order (raw coefficient index NLEV-1-k).
    let midpoint_height = Array4::from_shape_fn((NTIME, NLEV, NLAT, NLON), |(t, k, j, i)| {
        let raw = NLEV - 1 - k;
        let ps = surface_pressure[[t, j, i]];
        let p = hyam[raw] * P0 + hybm[raw] * ps;
        scale_height * (ps / p).ln() + zs[[j, i]]
    });

    ModelFields {
        surface_pressure,
        reference_pressure: P0,
        hyam,
        hybm,
        hyai,
        hybi,
        temperature: Array4::from_elem((NTIME, NLEV, NLAT, NLON), T0),
        specific_humidity: Array4::zeros((NTIME, NLEV, NLAT, NLON)),
        midpoint_height,
        surface_height: zs,
    }
}
