//! Model output loading.
//!
//! Reads a CAM/CESM-style NetCDF history file into the in-memory field
//! bundle the diagnostics consume. All numeric variable types are widened to
//! f64, and rank-4 fields are reversed along the level axis on load so the
//! rest of the crate only ever sees the increasing-altitude convention. The
//! hybrid coefficient sequences stay in raw file order (model top first);
//! the pressure reconstructor owns that reversal.

use ndarray::{Array2, Array3, Array4, Axis};
use std::path::Path;
use tracing::{debug, info};

use crate::constants::GRAVITY;
use crate::error::{CamdiagError, Result};
use crate::fields::ModelFields;

/// Load the named diagnostic input fields from a model output file.
///
/// Expects the CAM variable names: `PS`, `P0`, `hyam`, `hybm`, `hyai`,
/// `hybi`, `T`, `Q`, `Z3`, `PHIS`. `PS` and `PHIS` may be stored with or
/// without a leading time axis; `PHIS` (surface geopotential, m^2/s^2) is
/// divided by g and reduced to its first time step since terrain is static.
pub fn load_model_output(path: &Path) -> Result<ModelFields> {
    if !path.exists() {
        return Err(CamdiagError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = netcdf::open(path)?;
    info!("Opened model output file: {}", path.display());
    debug!("File has {} variables", file.variables().count());

    let surface_pressure = read_surface_pressure(&file)?;
    let reference_pressure = read_scalar(&file, "P0")?;
    let hyam = read_coefficients(&file, "hyam")?;
    let hybm = read_coefficients(&file, "hybm")?;
    let hyai = read_coefficients(&file, "hyai")?;
    let hybi = read_coefficients(&file, "hybi")?;
    let temperature = read_level_field(&file, "T")?;
    let specific_humidity = read_level_field(&file, "Q")?;
    let midpoint_height = read_level_field(&file, "Z3")?;
    let surface_height = read_surface_height(&file)?;

    let fields = ModelFields {
        surface_pressure,
        reference_pressure,
        hyam,
        hybm,
        hyai,
        hybi,
        temperature,
        specific_humidity,
        midpoint_height,
        surface_height,
    };
    fields.validate()?;

    let (ntime, nlev, nlat, nlon) = fields.grid_dim();
    info!(
        ntime = ntime,
        nlev = nlev,
        nlat = nlat,
        nlon = nlon,
        "Loaded model fields"
    );
    Ok(fields)
}

/// Look up a variable, with a diagnostic error when it is missing.
fn variable<'f>(file: &'f netcdf::File, name: &str) -> Result<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| CamdiagError::DataNotFound {
            message: format!("Variable not found: {}", name),
        })
}

/// Read every value of a variable, widened to f64.
fn read_values_f64(var: &netcdf::Variable) -> Result<Vec<f64>> {
    use netcdf::types::{BasicType, VariableType};

    match var.vartype() {
        VariableType::Basic(BasicType::Byte) => {
            let values: Vec<i8> = var.get_values::<i8, _>(&[] as &[netcdf::Extent])?;
            Ok(values.into_iter().map(|v| v as f64).collect())
        }
        VariableType::Basic(BasicType::Short) => {
            let values: Vec<i16> = var.get_values::<i16, _>(&[] as &[netcdf::Extent])?;
            Ok(values.into_iter().map(|v| v as f64).collect())
        }
        VariableType::Basic(BasicType::Int) => {
            let values: Vec<i32> = var.get_values::<i32, _>(&[] as &[netcdf::Extent])?;
            Ok(values.into_iter().map(|v| v as f64).collect())
        }
        VariableType::Basic(BasicType::Float) => {
            let values: Vec<f32> = var.get_values::<f32, _>(&[] as &[netcdf::Extent])?;
            Ok(values.into_iter().map(|v| v as f64).collect())
        }
        VariableType::Basic(BasicType::Double) => {
            Ok(var.get_values::<f64, _>(&[] as &[netcdf::Extent])?)
        }
        other => Err(CamdiagError::DataNotFound {
            message: format!(
                "Variable {} has unsupported type: {:?}",
                var.name(),
                other
            ),
        }),
    }
}

/// Dimension sizes of a variable, in storage order.
fn variable_shape(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions().iter().map(|dim| dim.len()).collect()
}

/// Read a scalar variable such as the reference pressure.
fn read_scalar(file: &netcdf::File, name: &str) -> Result<f64> {
    let var = variable(file, name)?;
    let values = read_values_f64(&var)?;
    values
        .first()
        .copied()
        .ok_or_else(|| CamdiagError::DataNotFound {
            message: format!("Variable {} holds no values", name),
        })
}

/// Read a 1-D hybrid coefficient sequence in raw file order.
fn read_coefficients(file: &netcdf::File, name: &str) -> Result<Vec<f64>> {
    let var = variable(file, name)?;
    let shape = variable_shape(&var);
    if shape.len() != 1 {
        return Err(CamdiagError::ShapeMismatch {
            message: format!("{} must be 1-D, got shape {:?}", name, shape),
        });
    }
    read_values_f64(&var)
}

/// Read surface pressure, promoting a time-less field to one time step.
fn read_surface_pressure(file: &netcdf::File) -> Result<Array3<f64>> {
    let var = variable(file, "PS")?;
    let shape = variable_shape(&var);
    let values = read_values_f64(&var)?;

    match shape.as_slice() {
        [nlat, nlon] => to_array((1, *nlat, *nlon), values, "PS"),
        [ntime, nlat, nlon] => to_array((*ntime, *nlat, *nlon), values, "PS"),
        other => Err(CamdiagError::ShapeMismatch {
            message: format!("PS must be rank 2 or 3, got shape {:?}", other),
        }),
    }
}

/// Read surface geopotential and convert it to height in meters.
fn read_surface_height(file: &netcdf::File) -> Result<Array2<f64>> {
    let var = variable(file, "PHIS")?;
    let shape = variable_shape(&var);
    let values = read_values_f64(&var)?;

    let phis: Array2<f64> = match shape.as_slice() {
        [nlat, nlon] => to_array((*nlat, *nlon), values, "PHIS")?,
        [ntime, nlat, nlon] => {
            let full: Array3<f64> = to_array((*ntime, *nlat, *nlon), values, "PHIS")?;
            // Terrain is static; keep the first time step.
            full.index_axis(Axis(0), 0).to_owned()
        }
        other => {
            return Err(CamdiagError::ShapeMismatch {
                message: format!("PHIS must be rank 2 or 3, got shape {:?}", other),
            });
        }
    };

    Ok(phis.mapv(|v| v / GRAVITY))
}

/// Read a rank-4 (time, lev, lat, lon) field and reverse its level axis so
/// that increasing index means increasing altitude.
fn read_level_field(file: &netcdf::File, name: &str) -> Result<Array4<f64>> {
    let var = variable(file, name)?;
    let shape = variable_shape(&var);
    let values = read_values_f64(&var)?;

    let mut field: Array4<f64> = match shape.as_slice() {
        [ntime, nlev, nlat, nlon] => {
            to_array((*ntime, *nlev, *nlat, *nlon), values, name)?
        }
        other => {
            return Err(CamdiagError::ShapeMismatch {
                message: format!("{} must be rank 4, got shape {:?}", name, other),
            });
        }
    };

    field.invert_axis(Axis(1));
    Ok(field)
}

/// Build an ndarray from flat NetCDF storage.
fn to_array<D>(
    dim: D,
    values: Vec<f64>,
    name: &str,
) -> Result<ndarray::Array<f64, D::Dim>>
where
    D: ndarray::IntoDimension,
{
    ndarray::Array::from_shape_vec(dim.into_dimension(), values).map_err(|e| {
        CamdiagError::ShapeMismatch {
            message: format!("{} data does not match its declared shape: {}", name, e),
        }
    })
}
