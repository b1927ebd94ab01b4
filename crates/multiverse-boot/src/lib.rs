//! Bootstrap confidence intervals for the specification curve
//!
//! This crate drives the resampling loop of a multiverse meta-analysis and
//! turns its output into per-rank confidence bounds:
//!
//! 1. The specification table is reduced to its distinct effect-ID sets
//!    (`multiverse_core::distinct_effect_sets`).
//! 2. [`SpecCurveBootstrap`] runs the configured number of iterations; each
//!    iteration calls the summary-effect aggregator once, expands the
//!    per-set values to per-specification values, sorts them ascending, and
//!    stores them as one column of the results matrix.
//! 3. [`row_percentile_bounds`] collapses each matrix row into its empirical
//!    percentile bounds (2.5% / 97.5% at the default confidence level).
//! 4. [`assemble_interval_table`] pairs each specification's observed mean
//!    with the bounds of its rank and [`write_interval_table`] persists the
//!    result as CSV.
//!
//! Matrix rows are aligned to specifications by *rank*, not identity: row
//! `k` holds the `k`-th smallest bootstrapped effect of every iteration and
//! is paired with the `k`-th specification of the input table. The whole run
//! either completes or aborts on the first error; no partial table is ever
//! written.
//!
//! # Example
//!
//! ```rust,ignore
//! use multiverse_boot::bootstrap_interval_table;
//! use multiverse_core::{ColumnMap, Specification};
//!
//! let table = bootstrap_interval_table(
//!     &specs, &data, &ColumnMap::new("es", "var", "study"),
//!     2,      // meta-analysis level
//!     5000,   // bootstrap iterations
//!     "boot.csv",
//! )?;
//! ```

pub mod api;
pub mod assemble;
pub mod driver;
pub mod intervals;

// Re-exports
pub use api::{
    bootstrap_interval_table, bootstrap_interval_table_with, DEFAULT_ITERATIONS, FAST_ITERATIONS,
    HIGH_PRECISION_ITERATIONS,
};
pub use assemble::{assemble_interval_table, write_interval_table};
pub use driver::{ProgressFn, SpecCurveBootstrap};
pub use intervals::{percentile_of_sorted, row_percentile_bounds};
