//! Column-name mapping for the meta-analytic dataset
//!
//! The dataset is consumed opaquely: the pipeline never hard-codes column
//! names, it resolves them through a [`ColumnMap`] supplied by the caller's
//! configuration. The map is passed through the bootstrap driver unchanged;
//! only the aggregators interpret it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maps logical column roles to dataset column names
///
/// The `cluster` column is only required for three-level models (effects
/// nested in studies nested in clusters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Column holding the effect sizes
    pub effect: String,
    /// Column holding the sampling variances
    pub variance: String,
    /// Column holding the study identifiers
    pub study: String,
    /// Column holding the cluster identifiers (three-level models only)
    #[serde(default)]
    pub cluster: Option<String>,
}

impl ColumnMap {
    /// Create a column map for a two-level dataset
    pub fn new(
        effect: impl Into<String>,
        variance: impl Into<String>,
        study: impl Into<String>,
    ) -> Self {
        Self {
            effect: effect.into(),
            variance: variance.into(),
            study: study.into(),
            cluster: None,
        }
    }

    /// Add the cluster column required by three-level models
    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// The cluster column name, or an error when the map has none
    pub fn cluster(&self) -> Result<&str> {
        self.cluster.as_deref().ok_or_else(|| {
            Error::InvalidConfiguration(
                "column map has no cluster column (required for three-level models)".to_string(),
            )
        })
    }
}
