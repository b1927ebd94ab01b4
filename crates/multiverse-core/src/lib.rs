//! Core types for specification-curve meta-analysis
//!
//! This crate provides the shared vocabulary of the workspace:
//!
//! - [`Error`] / [`Result`] - the unified error type
//! - [`Specification`] and [`EffectIdSet`] - one row of the specification
//!   table and the parsed set of effect observations it aggregates
//! - [`distinct_effect_sets`] - reduction of the specification table to the
//!   distinct effect-ID sets actually referenced
//! - [`ColumnMap`] - configuration naming the dataset columns that hold the
//!   effect sizes, variances, and hierarchy identifiers
//! - [`EffectTable`] - a columnar view extracted from a polars `DataFrame`
//!   through a [`ColumnMap`]
//! - [`SummaryEffects`] - the seam between the bootstrap driver and the
//!   level-specific summary-effect aggregators

pub mod colmap;
pub mod dataset;
pub mod error;
pub mod spec;
pub mod traits;

// Re-export core types
pub use colmap::ColumnMap;
pub use dataset::EffectTable;
pub use error::{Error, Result};
pub use spec::{
    distinct_effect_sets, read_specifications, specifications_from_dataframe, DistinctSets,
    EffectIdSet, Specification,
};
pub use traits::SummaryEffects;
