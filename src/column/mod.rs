//! Column diagnostics for hybrid sigma-pressure model output.
//!
//! This module holds the numerical core: pressure reconstruction on hybrid
//! levels, moist-air thermodynamics, and the two independent interface-height
//! derivations whose agreement validates the vertical coordinate transform.
//!
//! All fields exchanged here follow the increasing-altitude convention:
//! a larger level index means higher altitude and lower pressure. Interface
//! fields carry one more level than midpoint fields. Every routine allocates
//! fresh output and leaves its inputs untouched.

pub mod common;
pub mod compare;
pub mod hydrostatic;
pub mod midpoint;
pub mod pressure;
pub mod thermo;

pub use compare::{relative_difference_stats, AgreementStats};
pub use hydrostatic::hydrostatic_interface_heights;
pub use midpoint::midpoint_interface_heights;
pub use pressure::hybrid_level_pressure;
pub use thermo::{moist_air_density, virtual_temperature};
