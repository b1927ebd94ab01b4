//! High-level API for specification-curve bootstrap intervals
//!
//! Thin wrappers around [`SpecCurveBootstrap`] for the common case: pick the
//! aggregator by meta-analysis level, run the iterations, write the CSV, and
//! return the table.

use crate::driver::SpecCurveBootstrap;
use multiverse_core::{ColumnMap, Result, Specification, SummaryEffects};
use multiverse_meta::LevelAggregator;
use polars::prelude::DataFrame;
use std::path::Path;

/// Default number of bootstrap iterations
pub const DEFAULT_ITERATIONS: usize = 5000;

/// Fast iteration count for quick estimates
pub const FAST_ITERATIONS: usize = 1000;

/// High-precision iteration count
pub const HIGH_PRECISION_ITERATIONS: usize = 20000;

/// Bootstrap the specification curve with a level-selected aggregator
///
/// `level` must be 2 or 3; anything else fails before any iteration runs.
/// The interval table is written to `save_path` and returned in-memory.
///
/// # Example
/// ```rust,ignore
/// use multiverse_boot::{bootstrap_interval_table, DEFAULT_ITERATIONS};
/// use multiverse_core::{ColumnMap, Specification};
///
/// let table = bootstrap_interval_table(
///     &specs,
///     &data,
///     &ColumnMap::new("es", "var", "study"),
///     2,
///     DEFAULT_ITERATIONS,
///     "boot.csv",
/// )?;
/// ```
pub fn bootstrap_interval_table(
    specs: &[Specification],
    data: &DataFrame,
    colmap: &ColumnMap,
    level: i64,
    n_iter: usize,
    save_path: impl AsRef<Path>,
) -> Result<DataFrame> {
    let aggregator = LevelAggregator::for_level(level)?;
    SpecCurveBootstrap::new()
        .with_iterations(n_iter)
        .interval_table(specs, &aggregator, data, colmap, save_path)
}

/// Bootstrap the specification curve with a caller-supplied aggregator
///
/// Use this when the resampling policy differs from the shipped two- and
/// three-level models.
pub fn bootstrap_interval_table_with<A: SummaryEffects>(
    specs: &[Specification],
    aggregator: &A,
    data: &DataFrame,
    colmap: &ColumnMap,
    n_iter: usize,
    save_path: impl AsRef<Path>,
) -> Result<DataFrame> {
    SpecCurveBootstrap::new()
        .with_iterations(n_iter)
        .interval_table(specs, aggregator, data, colmap, save_path)
}
