//! Three-level summary-effect aggregator
//!
//! Effects are nested in studies nested in clusters. Each bootstrap
//! iteration resamples, per effect-ID set, in two stages: clusters with
//! replacement, then studies with replacement within each drawn cluster.
//! Pooling is the same random-effects weighting as the two-level model.

use crate::pooling::random_effects_mean;
use crate::resample::{draw_groups, group_rows};
use multiverse_core::{ColumnMap, EffectIdSet, EffectTable, Error, Result, SummaryEffects};
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// Cluster-then-study bootstrap aggregator for three-level models
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeLevelAggregator;

impl ThreeLevelAggregator {
    /// Create a new three-level aggregator
    pub fn new() -> Self {
        Self
    }

    fn pooled_resample(
        &self,
        set: &EffectIdSet,
        table: &EffectTable,
        clusters: &[String],
        rng: &mut StdRng,
    ) -> Result<f64> {
        let rows = table.rows_for(set)?;
        let cluster_groups = group_rows(&rows, clusters);

        let mut drawn = Vec::new();
        for _ in 0..cluster_groups.len() {
            let cluster = &cluster_groups[rng.gen_range(0..cluster_groups.len())];
            let studies = group_rows(cluster, &table.studies);
            drawn.extend(draw_groups(&studies, rng));
        }

        let effects: Vec<f64> = drawn.iter().map(|&r| table.effects[r]).collect();
        let variances: Vec<f64> = drawn.iter().map(|&r| table.variances[r]).collect();
        random_effects_mean(&effects, &variances)
    }
}

impl SummaryEffects for ThreeLevelAggregator {
    fn aggregate(
        &self,
        sets: &[EffectIdSet],
        data: &DataFrame,
        colmap: &ColumnMap,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>> {
        let table = EffectTable::from_dataframe(data, colmap)?;
        let clusters = table.clusters.clone().ok_or_else(|| {
            Error::InvalidConfiguration(
                "three-level aggregation requires a cluster column in the column map".to_string(),
            )
        })?;
        debug!(
            n_sets = sets.len(),
            n_effects = table.len(),
            "three-level resample"
        );
        sets.iter()
            .map(|set| self.pooled_resample(set, &table, &clusters, rng))
            .collect()
    }

    fn name(&self) -> &'static str {
        "three-level random effects"
    }
}
