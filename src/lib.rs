//! Bootstrap inference for specification-curve (multiverse) meta-analysis
//!
//! A multiverse meta-analysis evaluates every defensible combination of
//! analytic choices ("specifications") and summarizes each one with a pooled
//! effect. This crate computes empirical confidence bounds for that curve of
//! summary effects: it resamples the meta-analytic dataset, recomputes each
//! specification's summary on the resampled data, and collapses the resulting
//! distribution into per-rank percentile intervals.
//!
//! The workspace is split into three crates, re-exported here:
//!
//! - [`multiverse_core`] - shared types: errors, the column map, effect-ID
//!   sets, specification parsing and deduplication, and the
//!   [`SummaryEffects`] collaborator trait
//! - [`multiverse_meta`] - two-level and three-level random-effects
//!   aggregators that perform the actual resample-and-pool step
//! - [`multiverse_boot`] - the bootstrap driver, percentile interval
//!   estimator, and result assembly/persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use multiverse_stats::{bootstrap_interval_table, ColumnMap, Specification};
//! use polars::prelude::*;
//!
//! let data = df![
//!     "es"      => [0.21, 0.34, 0.12, 0.44],
//!     "var"     => [0.04, 0.05, 0.03, 0.06],
//!     "study"   => ["s1", "s1", "s2", "s3"],
//! ]?;
//!
//! let specs = vec![
//!     Specification::new("1,2,3,4", 0.28),
//!     Specification::new("1,2", 0.27),
//! ];
//! let colmap = ColumnMap::new("es", "var", "study");
//!
//! let table = bootstrap_interval_table(&specs, &data, &colmap, 2, 5000, "boot.csv")?;
//! println!("{table}");
//! ```

pub use multiverse_core::{
    distinct_effect_sets, read_specifications, specifications_from_dataframe, ColumnMap,
    DistinctSets, EffectIdSet, EffectTable, Error, Result, Specification, SummaryEffects,
};

pub use multiverse_meta::{
    random_effects_mean, LevelAggregator, MetaLevel, ThreeLevelAggregator, TwoLevelAggregator,
};

pub use multiverse_boot::{
    assemble_interval_table, bootstrap_interval_table, percentile_of_sorted,
    row_percentile_bounds, write_interval_table, SpecCurveBootstrap, DEFAULT_ITERATIONS,
    FAST_ITERATIONS, HIGH_PRECISION_ITERATIONS,
};
