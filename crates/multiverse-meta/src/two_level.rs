//! Two-level summary-effect aggregator
//!
//! Effects are nested in studies. Each bootstrap iteration resamples, per
//! effect-ID set, the set's studies with replacement (every drawn study
//! contributes all of its effect observations) and pools the resampled
//! effects with random-effects weights.

use crate::pooling::random_effects_mean;
use crate::resample::{draw_groups, group_rows};
use multiverse_core::{ColumnMap, EffectIdSet, EffectTable, Result, SummaryEffects};
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use tracing::debug;

/// Study-bootstrap aggregator for two-level models
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoLevelAggregator;

impl TwoLevelAggregator {
    /// Create a new two-level aggregator
    pub fn new() -> Self {
        Self
    }

    fn pooled_resample(
        &self,
        set: &EffectIdSet,
        table: &EffectTable,
        rng: &mut StdRng,
    ) -> Result<f64> {
        let rows = table.rows_for(set)?;
        let studies = group_rows(&rows, &table.studies);
        let drawn = draw_groups(&studies, rng);

        let effects: Vec<f64> = drawn.iter().map(|&r| table.effects[r]).collect();
        let variances: Vec<f64> = drawn.iter().map(|&r| table.variances[r]).collect();
        random_effects_mean(&effects, &variances)
    }
}

impl SummaryEffects for TwoLevelAggregator {
    fn aggregate(
        &self,
        sets: &[EffectIdSet],
        data: &DataFrame,
        colmap: &ColumnMap,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>> {
        let table = EffectTable::from_dataframe(data, colmap)?;
        debug!(
            n_sets = sets.len(),
            n_effects = table.len(),
            "two-level resample"
        );
        sets.iter()
            .map(|set| self.pooled_resample(set, &table, rng))
            .collect()
    }

    fn name(&self) -> &'static str {
        "two-level random effects"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use polars::prelude::*;
    use rand::SeedableRng;

    fn sample_df() -> DataFrame {
        df![
            "es"    => [0.2, 0.4, 0.1, 0.6],
            "var"   => [0.04, 0.05, 0.03, 0.06],
            "study" => ["s1", "s1", "s2", "s3"],
        ]
        .unwrap()
    }

    fn colmap() -> ColumnMap {
        ColumnMap::new("es", "var", "study")
    }

    fn sets(raw: &[&str]) -> Vec<EffectIdSet> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_one_value_per_set() {
        let agg = TwoLevelAggregator::new();
        let mut rng = StdRng::seed_from_u64(42);
        let values = agg
            .aggregate(&sets(&["1,2,3,4", "1,2", "3"]), &sample_df(), &colmap(), &mut rng)
            .unwrap();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_single_study_set_is_deterministic() {
        // A set covering one study always resamples to itself
        let agg = TwoLevelAggregator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let values = agg
            .aggregate(&sets(&["3"]), &sample_df(), &colmap(), &mut rng)
            .unwrap();
        assert_abs_diff_eq!(values[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_values_stay_within_set_range() {
        let agg = TwoLevelAggregator::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let values = agg
                .aggregate(&sets(&["1,2,3,4"]), &sample_df(), &colmap(), &mut rng)
                .unwrap();
            assert!(values[0] >= 0.1 && values[0] <= 0.6);
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let agg = TwoLevelAggregator::new();
        let all = sets(&["1,2,3,4", "1,2"]);
        let a = agg
            .aggregate(&all, &sample_df(), &colmap(), &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = agg
            .aggregate(&all, &sample_df(), &colmap(), &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_effect_id_fails() {
        let agg = TwoLevelAggregator::new();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(agg
            .aggregate(&sets(&["1,9"]), &sample_df(), &colmap(), &mut rng)
            .is_err());
    }
}
