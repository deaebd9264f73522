//! The full diagnostic pipeline.
//!
//! Wires the column components together: reconstruct pressures on both level
//! sets, derive virtual temperature and moist-air density, produce the two
//! independent interface-height fields, and summarize their agreement.

use ndarray::Array4;
use std::time::Instant;
use tracing::{debug, info};

use crate::column::{
    hybrid_level_pressure, hydrostatic_interface_heights, midpoint_interface_heights,
    moist_air_density, relative_difference_stats, virtual_temperature, AgreementStats,
};
use crate::error::Result;
use crate::fields::ModelFields;

/// Everything one diagnostic run derives from the input fields.
#[derive(Debug, Clone)]
pub struct ColumnDiagnostics {
    /// Pressure on midpoint levels (time, level, lat, lon) [Pa]
    pub midpoint_pressure: Array4<f64>,
    /// Pressure on interface levels, one more level [Pa]
    pub interface_pressure: Array4<f64>,
    /// Virtual temperature on midpoint levels [K]
    pub virtual_temperature: Array4<f64>,
    /// Moist-air density on midpoint levels [kg/m^3]
    pub density: Array4<f64>,
    /// Interface heights from midpoint interpolation [m]
    pub midpoint_height: Array4<f64>,
    /// Interface heights from hydrostatic integration [m]
    pub hydrostatic_height: Array4<f64>,
    /// Agreement statistics between the two height fields
    pub agreement: AgreementStats,
}

/// Run the column diagnostics over a validated field bundle.
pub fn diagnose(fields: &ModelFields) -> Result<ColumnDiagnostics> {
    fields.validate()?;

    let (ntime, nlev, nlat, nlon) = fields.grid_dim();
    info!(
        ntime = ntime,
        nlev = nlev,
        nlat = nlat,
        nlon = nlon,
        "Running column diagnostics"
    );
    let start = Instant::now();

    let ps = fields.surface_pressure.view().into_dyn();
    let midpoint_pressure =
        hybrid_level_pressure(ps.clone(), fields.reference_pressure, &fields.hyam, &fields.hybm)?;
    let interface_pressure =
        hybrid_level_pressure(ps, fields.reference_pressure, &fields.hyai, &fields.hybi)?;
    debug!("Reconstructed midpoint and interface pressures");

    let tv = virtual_temperature(
        fields.temperature.view(),
        fields.specific_humidity.view(),
    )?;
    let density = moist_air_density(midpoint_pressure.view(), tv.view())?;
    debug!("Derived virtual temperature and moist-air density");

    let midpoint_height = midpoint_interface_heights(
        fields.midpoint_height.view(),
        fields.surface_height.view(),
    )?;
    let hydrostatic_height = hydrostatic_interface_heights(
        fields.surface_height.view(),
        density.view(),
        interface_pressure.view(),
    )?;
    debug!("Estimated interface heights by both methods");

    let agreement = relative_difference_stats(midpoint_height.view(), hydrostatic_height.view())?;

    info!(
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        points = agreement.count,
        mean_pct = agreement.mean_pct,
        std_dev_pct = agreement.std_dev_pct,
        max_pct = agreement.max_pct,
        "Column diagnostics complete"
    );

    Ok(ColumnDiagnostics {
        midpoint_pressure,
        interface_pressure,
        virtual_temperature: tv,
        density,
        midpoint_height,
        hydrostatic_height,
        agreement,
    })
}
