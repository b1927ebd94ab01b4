//! Bootstrap interval table assembly and persistence
//!
//! One output row per specification: its 1-based rank, the observed summary
//! effect, and the bootstrap bounds of that rank. The CSV is rendered fully
//! in memory before anything touches the filesystem, so a failed run never
//! leaves a truncated file behind.

use multiverse_core::{Error, Result, Specification};
use polars::prelude::*;
use std::path::Path;

/// Build the bootstrap interval table
///
/// `rank` is derived purely from row position; `obs` is the specification's
/// observed mean. Bound lengths must match the specification count.
pub fn assemble_interval_table(
    specs: &[Specification],
    boot_lb: &[f64],
    boot_ub: &[f64],
) -> Result<DataFrame> {
    if boot_lb.len() != specs.len() {
        return Err(Error::shape_mismatch(
            "lower bounds",
            specs.len(),
            boot_lb.len(),
        ));
    }
    if boot_ub.len() != specs.len() {
        return Err(Error::shape_mismatch(
            "upper bounds",
            specs.len(),
            boot_ub.len(),
        ));
    }

    let rank: Vec<u32> = (1..=specs.len() as u32).collect();
    let obs: Vec<f64> = specs.iter().map(|s| s.mean).collect();

    let table = df![
        "rank"    => rank,
        "obs"     => obs,
        "boot_lb" => boot_lb,
        "boot_ub" => boot_ub,
    ]?;
    Ok(table)
}

/// Persist the interval table as CSV (header row, no index column)
pub fn write_interval_table(table: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut table.clone())?;
    std::fs::write(path.as_ref(), buf)?;
    Ok(())
}
