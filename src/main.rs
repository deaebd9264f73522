//! camdiag - atmospheric-column diagnostics for hybrid-coordinate model output
//!
//! This is the main entry point for the camdiag application.

use anyhow::Context;
use tracing::{info, warn};

use camdiag::logging::init_tracing;
use camdiag::reader::load_model_output;
use camdiag::{diagnose, log_field_load_stats, Config};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, model_path) = Config::load()?;

    // Validate configuration
    config.validate()?;

    init_tracing(&config.log_level);
    info!("Starting camdiag v{}", env!("CARGO_PKG_VERSION"));

    info!("Loading model output: {:?}", model_path);
    let fields = load_model_output(&model_path)
        .with_context(|| format!("failed to load model output from {}", model_path.display()))?;

    let (ntime, nlev, nlat, nlon) = fields.grid_dim();
    // Three rank-4 input fields dominate the footprint.
    let memory_usage = 3 * ntime * nlev * nlat * nlon * std::mem::size_of::<f64>();
    log_field_load_stats(
        &model_path.display().to_string(),
        ntime,
        nlev,
        nlat,
        nlon,
        memory_usage,
    );

    let diagnostics = diagnose(&fields).context("column diagnostics failed")?;
    let stats = &diagnostics.agreement;

    if config.report.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!("Interface-height agreement over {} grid points:", stats.count);
        println!("  mean    {:>10.4} %", stats.mean_pct);
        println!("  std dev {:>10.4} %", stats.std_dev_pct);
        println!("  min     {:>10.4} %", stats.min_pct);
        println!("  max     {:>10.4} %", stats.max_pct);
    }

    if !config.tolerance.accepts(stats) {
        warn!(
            mean_pct = stats.mean_pct,
            std_dev_pct = stats.std_dev_pct,
            max_pct = stats.max_pct,
            "Agreement statistics exceed the configured tolerances"
        );
        anyhow::bail!(
            "height estimates disagree beyond tolerance (mean {:.4}%, std dev {:.4}%, max {:.4}%)",
            stats.mean_pct,
            stats.std_dev_pct,
            stats.max_pct
        );
    }

    info!("Height estimates agree within tolerance");
    Ok(())
}
