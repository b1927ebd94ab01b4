//! Random-effects summary-effect aggregators
//!
//! This crate provides the level-specific collaborators the bootstrap driver
//! calls once per iteration. Both aggregators pool effect sizes with
//! inverse-variance random-effects weights (DerSimonian-Laird between-effect
//! variance); they differ in the unit they resample:
//!
//! - [`TwoLevelAggregator`] - effects nested in studies; resamples studies
//!   with replacement within each effect-ID set
//! - [`ThreeLevelAggregator`] - effects nested in studies nested in
//!   clusters; resamples clusters, then studies within each drawn cluster
//!
//! The meta-analysis level is selected once, up front, through
//! [`MetaLevel::from_level`]; anything outside {2, 3} is rejected. No
//! default aggregator is ever chosen.
//!
//! # Example
//!
//! ```rust,ignore
//! use multiverse_meta::LevelAggregator;
//! use multiverse_core::{ColumnMap, SummaryEffects};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let aggregator = LevelAggregator::for_level(2)?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let values = aggregator.aggregate(&sets, &data, &colmap, &mut rng)?;
//! ```

mod level;
mod pooling;
mod resample;
mod three_level;
mod two_level;

pub use level::{LevelAggregator, MetaLevel};
pub use pooling::{dersimonian_laird_tau2, random_effects_mean};
pub use three_level::ThreeLevelAggregator;
pub use two_level::TwoLevelAggregator;
