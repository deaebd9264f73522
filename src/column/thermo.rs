//! Moist-air thermodynamics.
//!
//! Elementwise transforms from temperature, specific humidity, and pressure
//! to virtual temperature and moist-air density. These functions do not
//! validate physical plausibility; non-finite input propagates to non-finite
//! output, and the hydrostatic integrator rejects unusable densities at its
//! own entry.

use ndarray::{Array4, ArrayView4, Zip};

use super::common::ensure_same_shape;
use crate::constants::{EPSILON, R_DRY};
use crate::error::Result;

/// Virtual temperature in kelvin: `Tv = T * (1 + q * (1/eps - 1))`.
///
/// `temperature` is in kelvin, `specific_humidity` is a dimensionless mass
/// ratio; the two fields must have identical shapes.
pub fn virtual_temperature(
    temperature: ArrayView4<'_, f64>,
    specific_humidity: ArrayView4<'_, f64>,
) -> Result<Array4<f64>> {
    ensure_same_shape(
        "temperature",
        &temperature,
        "specific humidity",
        &specific_humidity,
    )?;

    let moisture_factor = 1.0 / EPSILON - 1.0;
    let mut tv = Array4::<f64>::zeros(temperature.dim());
    Zip::from(&mut tv)
        .and(&temperature)
        .and(&specific_humidity)
        .for_each(|dst, &t, &q| *dst = t * (1.0 + q * moisture_factor));
    Ok(tv)
}

/// Moist-air density in kg/m^3: `rho = p / (Rd * Tv)`.
///
/// `pressure` is in pascals, `virtual_temperature` in kelvin; shapes must
/// match.
pub fn moist_air_density(
    pressure: ArrayView4<'_, f64>,
    virtual_temperature: ArrayView4<'_, f64>,
) -> Result<Array4<f64>> {
    ensure_same_shape(
        "pressure",
        &pressure,
        "virtual temperature",
        &virtual_temperature,
    )?;

    let mut rho = Array4::<f64>::zeros(pressure.dim());
    Zip::from(&mut rho)
        .and(&pressure)
        .and(&virtual_temperature)
        .for_each(|dst, &p, &tv| *dst = p / (R_DRY * tv));
    Ok(rho)
}
