//! Logging utilities for camdiag.
//!
//! This module provides structured logging functionality to make diagnostic
//! runs traceable: what was loaded, what was computed, and how long it took.

use std::time::Instant;
use tracing::{debug, error, info};

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();

    debug!(operation = operation, "Starting operation");

    let result = f();

    info!(
        operation = operation,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about the fields loaded for a run
pub fn log_field_load_stats(
    file_path: &str,
    ntime: usize,
    nlev: usize,
    nlat: usize,
    nlon: usize,
    memory_usage: usize,
) {
    info!(
        operation = "field_load",
        file_path = file_path,
        ntime = ntime,
        nlev = nlev,
        nlat = nlat,
        nlon = nlon,
        memory_mb = memory_usage / (1024 * 1024),
        "Fields loaded successfully"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::CamdiagError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_log_timed_operation() {
        // This is more of a functional test to ensure it doesn't panic
        let result = log_timed_operation("test_operation", || {
            // Simulate some work
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }
}
