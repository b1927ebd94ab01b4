//! Bootstrap iteration driver
//!
//! [`SpecCurveBootstrap`] owns the resampling loop: one aggregator call per
//! iteration, per-set values expanded to per-specification values, sorted
//! ascending, and stored as that iteration's column of the results matrix.
//! Iterations never read each other's output, so the `parallel` feature can
//! run them on rayon workers; columns are always assembled by iteration
//! index, and per-iteration RNG derivation keeps a fixed-seed run
//! bit-identical in both modes.

use crate::assemble::{assemble_interval_table, write_interval_table};
use crate::intervals::row_percentile_bounds;
use multiverse_core::{
    distinct_effect_sets, ColumnMap, DistinctSets, Error, Result, Specification, SummaryEffects,
};
use nalgebra::DMatrix;
use polars::prelude::DataFrame;
use rand::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Progress observer: (iterations completed, total iterations)
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Specification-curve bootstrap driver
///
/// Builder-style configuration; the run itself is a pure function of the
/// inputs and the seed. Iteration count is validated when the run starts,
/// not when it is set, so a zero count surfaces as a configuration error
/// rather than a panic.
#[derive(Clone)]
pub struct SpecCurveBootstrap {
    n_iter: usize,
    confidence_level: f64,
    seed: Option<u64>,
    progress: Option<Arc<ProgressFn>>,
}

impl SpecCurveBootstrap {
    /// Create a new driver with default settings
    pub fn new() -> Self {
        Self {
            n_iter: 5000,           // Default
            confidence_level: 0.95, // Default
            seed: None,
            progress: None,
        }
    }

    /// Set the number of bootstrap iterations
    pub fn with_iterations(mut self, n_iter: usize) -> Self {
        self.n_iter = n_iter;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        assert!(
            confidence_level > 0.0 && confidence_level < 1.0,
            "Confidence level must be in (0, 1)"
        );
        self.confidence_level = confidence_level;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Observe progress without altering the run's output
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Run all bootstrap iterations and collect the results matrix
    ///
    /// The matrix has one row per specification and one column per
    /// iteration; row `i`, column `j` holds the `i`-th smallest bootstrapped
    /// summary effect of iteration `j`.
    #[instrument(skip_all, fields(n_specs = specs.len(), n_iter = self.n_iter))]
    pub fn resample_matrix<A: SummaryEffects>(
        &self,
        specs: &[Specification],
        aggregator: &A,
        data: &DataFrame,
        colmap: &ColumnMap,
    ) -> Result<DMatrix<f64>> {
        if self.n_iter == 0 {
            return Err(Error::InvalidConfiguration(
                "iteration count must be positive".to_string(),
            ));
        }

        let distinct = distinct_effect_sets(specs)?;
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        debug!(
            n_sets = distinct.n_sets(),
            seed,
            aggregator = aggregator.name(),
            "running bootstrap iterations"
        );

        let columns = self.collect_columns(&distinct, seed, aggregator, data, colmap)?;

        let mut matrix = DMatrix::zeros(specs.len(), self.n_iter);
        for (col, column) in columns.iter().enumerate() {
            for (row, &value) in column.iter().enumerate() {
                matrix[(row, col)] = value;
            }
        }
        Ok(matrix)
    }

    /// Run the full pipeline: resample, estimate bounds, assemble, persist
    #[instrument(skip_all, fields(n_specs = specs.len(), n_iter = self.n_iter))]
    pub fn interval_table<A: SummaryEffects>(
        &self,
        specs: &[Specification],
        aggregator: &A,
        data: &DataFrame,
        colmap: &ColumnMap,
        save_path: impl AsRef<Path>,
    ) -> Result<DataFrame> {
        let matrix = self.resample_matrix(specs, aggregator, data, colmap)?;
        let (boot_lb, boot_ub) = row_percentile_bounds(&matrix, self.confidence_level)?;
        let table = assemble_interval_table(specs, &boot_lb, &boot_ub)?;
        write_interval_table(&table, save_path.as_ref())?;
        info!(
            n_specs = specs.len(),
            n_iter = self.n_iter,
            path = %save_path.as_ref().display(),
            "bootstrap interval table written"
        );
        Ok(table)
    }

    /// One iteration: aggregate, expand per-set values to per-spec values,
    /// sort ascending
    fn iteration_column<A: SummaryEffects>(
        &self,
        iteration: usize,
        seed: u64,
        distinct: &DistinctSets,
        aggregator: &A,
        data: &DataFrame,
        colmap: &ColumnMap,
    ) -> Result<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(iteration as u64));
        let values = aggregator.aggregate(distinct.sets(), data, colmap, &mut rng)?;
        if values.len() != distinct.n_sets() {
            return Err(Error::shape_mismatch(
                "aggregator output",
                distinct.n_sets(),
                values.len(),
            ));
        }

        // Every specification sharing a set receives that set's value
        let mut column: Vec<f64> = distinct
            .membership()
            .iter()
            .map(|&set| values[set])
            .collect();
        column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Ok(column)
    }

    fn report_progress(&self, completed: usize) {
        debug!(completed, total = self.n_iter, "bootstrap iteration finished");
        if let Some(progress) = &self.progress {
            progress(completed, self.n_iter);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_columns<A: SummaryEffects>(
        &self,
        distinct: &DistinctSets,
        seed: u64,
        aggregator: &A,
        data: &DataFrame,
        colmap: &ColumnMap,
    ) -> Result<Vec<Vec<f64>>> {
        (0..self.n_iter)
            .map(|iteration| {
                let column =
                    self.iteration_column(iteration, seed, distinct, aggregator, data, colmap)?;
                self.report_progress(iteration + 1);
                Ok(column)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn collect_columns<A: SummaryEffects>(
        &self,
        distinct: &DistinctSets,
        seed: u64,
        aggregator: &A,
        data: &DataFrame,
        colmap: &ColumnMap,
    ) -> Result<Vec<Vec<f64>>> {
        use rayon::prelude::*;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let completed = AtomicUsize::new(0);
        (0..self.n_iter)
            .into_par_iter()
            .map(|iteration| {
                let column =
                    self.iteration_column(iteration, seed, distinct, aggregator, data, colmap)?;
                self.report_progress(completed.fetch_add(1, Ordering::Relaxed) + 1);
                Ok(column)
            })
            .collect()
    }
}

impl Default for SpecCurveBootstrap {
    fn default() -> Self {
        Self::new()
    }
}
