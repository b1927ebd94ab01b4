//! The seam between the bootstrap driver and the summary-effect aggregators
//!
//! The driver never performs resampling itself: once per iteration it hands
//! the full list of distinct effect-ID sets to a [`SummaryEffects`]
//! implementation, which resamples the dataset under its own policy (cluster
//! bootstrap, study bootstrap, ...) and pools one summary effect per set.

use crate::colmap::ColumnMap;
use crate::error::Result;
use crate::spec::EffectIdSet;
use polars::prelude::DataFrame;
use rand::rngs::StdRng;

/// Per-iteration summary-effect computation over resampled data
///
/// Implementations must be deterministic in shape (one value per input set,
/// in input order) but stochastic in value through the supplied RNG. The
/// driver derives one RNG per iteration from the run seed, which keeps
/// fixed-seed runs reproducible whether iterations execute sequentially or
/// in parallel.
pub trait SummaryEffects: Send + Sync {
    /// Compute one bootstrapped summary effect per effect-ID set
    fn aggregate(
        &self,
        sets: &[EffectIdSet],
        data: &DataFrame,
        colmap: &ColumnMap,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>>;

    /// Aggregator name for documentation
    fn name(&self) -> &'static str;
}
