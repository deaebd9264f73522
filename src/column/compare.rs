//! Agreement statistics between the two interface-height estimates.
//!
//! The midpoint and hydrostatic methods derive the same physical quantity
//! from independent inputs; their elementwise relative difference is the
//! figure of merit for the vertical coordinate transform.

use ndarray::ArrayView4;
use serde::Serialize;

use super::common::ensure_same_shape;
use crate::error::{CamdiagError, Result};

/// Summary statistics of the relative height difference, in percent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgreementStats {
    /// Number of grid points that entered the distribution
    pub count: usize,
    /// Minimum relative difference [%]
    pub min_pct: f64,
    /// Maximum relative difference [%]
    pub max_pct: f64,
    /// Mean relative difference [%]
    pub mean_pct: f64,
    /// Population standard deviation of the relative difference [%]
    pub std_dev_pct: f64,
}

/// Compute `(midpoint - hydrostatic) / hydrostatic * 100` statistics.
///
/// Only positions where both fields are non-zero enter the distribution;
/// zero marks masked or undefined surface points. The two fields must have
/// identical shapes. An empty selection is an error rather than a NaN
/// summary.
pub fn relative_difference_stats(
    midpoint: ArrayView4<'_, f64>,
    hydrostatic: ArrayView4<'_, f64>,
) -> Result<AgreementStats> {
    ensure_same_shape("midpoint heights", &midpoint, "hydrostatic heights", &hydrostatic)?;

    let mut diffs = Vec::new();
    for (&m, &h) in midpoint.iter().zip(hydrostatic.iter()) {
        if m != 0.0 && h != 0.0 {
            diffs.push((m - h) / h * 100.0);
        }
    }

    if diffs.is_empty() {
        return Err(CamdiagError::DataNotFound {
            message: "no overlapping non-zero points to compare".to_string(),
        });
    }

    let count = diffs.len();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &d in &diffs {
        min = min.min(d);
        max = max.max(d);
        sum += d;
    }
    let mean = sum / count as f64;
    let variance = diffs.iter().map(|&d| (d - mean) * (d - mean)).sum::<f64>() / count as f64;

    Ok(AgreementStats {
        count,
        min_pct: min,
        max_pct: max,
        mean_pct: mean,
        std_dev_pct: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_known_distribution() {
        // Differences of +1%, -1%, +2%; the zero pair is masked out.
        let midpoint = Array4::from_shape_vec((1, 1, 1, 4), vec![0.0, 101.0, 99.0, 102.0]).unwrap();
        let hydro = Array4::from_shape_vec((1, 1, 1, 4), vec![0.0, 100.0, 100.0, 100.0]).unwrap();

        let stats = relative_difference_stats(midpoint.view(), hydro.view()).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.min_pct - -1.0).abs() < 1e-12);
        assert!((stats.max_pct - 2.0).abs() < 1e-12);
        assert!((stats.mean_pct - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats.std_dev_pct - 1.247219128924647).abs() < 1e-12);
    }

    #[test]
    fn test_identical_fields_have_zero_spread() {
        let field = Array4::from_shape_fn((2, 3, 2, 2), |(t, k, j, i)| {
            100.0 + (t + k + j + i) as f64
        });
        let stats = relative_difference_stats(field.view(), field.view()).unwrap();
        assert_eq!(stats.count, field.len());
        assert_eq!(stats.mean_pct, 0.0);
        assert_eq!(stats.std_dev_pct, 0.0);
        assert_eq!(stats.min_pct, 0.0);
        assert_eq!(stats.max_pct, 0.0);
    }

    #[test]
    fn test_zero_points_excluded_on_either_side() {
        let midpoint = Array4::from_shape_vec((1, 1, 1, 3), vec![0.0, 50.0, 101.0]).unwrap();
        let hydro = Array4::from_shape_vec((1, 1, 1, 3), vec![10.0, 0.0, 100.0]).unwrap();
        let stats = relative_difference_stats(midpoint.view(), hydro.view()).unwrap();
        assert_eq!(stats.count, 1);
        assert!((stats.mean_pct - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_masked_is_an_error() {
        let zeros = Array4::<f64>::zeros((1, 1, 2, 2));
        let result = relative_difference_stats(zeros.view(), zeros.view());
        assert!(matches!(result, Err(CamdiagError::DataNotFound { .. })));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = Array4::<f64>::ones((1, 2, 2, 2));
        let b = Array4::<f64>::ones((1, 3, 2, 2));
        let result = relative_difference_stats(a.view(), b.view());
        assert!(matches!(result, Err(CamdiagError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let field = Array4::from_elem((1, 1, 1, 1), 100.0);
        let stats = relative_difference_stats(field.view(), field.view()).unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"mean_pct\":0.0"));
    }
}
