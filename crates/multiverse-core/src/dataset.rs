//! Columnar view of the meta-analytic dataset
//!
//! Aggregators consume the dataset opaquely: they resolve the columns named
//! by the [`ColumnMap`](crate::ColumnMap) and work on plain vectors from
//! there. [`EffectTable`] is that extracted view - effect sizes, sampling
//! variances, and the hierarchy keys (study, and cluster when mapped).

use crate::colmap::ColumnMap;
use crate::error::{Error, Result};
use crate::spec::EffectIdSet;
use polars::prelude::*;

/// Extracted effect-size columns of a meta-analytic dataset
///
/// Row positions match the source `DataFrame`; effect ids in an
/// [`EffectIdSet`] address these rows 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTable {
    /// Effect sizes
    pub effects: Vec<f64>,
    /// Sampling variances
    pub variances: Vec<f64>,
    /// Study key per effect observation
    pub studies: Vec<String>,
    /// Cluster key per effect observation (three-level datasets only)
    pub clusters: Option<Vec<String>>,
}

impl EffectTable {
    /// Extract the mapped columns from a dataset
    ///
    /// The cluster column is only extracted when the map names one. Numeric
    /// columns may be any integer or float type; hierarchy keys may be any
    /// type castable to a string. Nulls are rejected.
    pub fn from_dataframe(df: &DataFrame, colmap: &ColumnMap) -> Result<Self> {
        let effects = numeric_column(df, &colmap.effect)?;
        let variances = numeric_column(df, &colmap.variance)?;
        let studies = key_column(df, &colmap.study)?;
        let clusters = match &colmap.cluster {
            Some(name) => Some(key_column(df, name)?),
            None => None,
        };

        Ok(Self {
            effects,
            variances,
            studies,
            clusters,
        })
    }

    /// Number of effect observations
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the table has no observations
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Resolve a set's 1-based effect ids to 0-based row indices
    pub fn rows_for(&self, set: &EffectIdSet) -> Result<Vec<usize>> {
        set.ids()
            .iter()
            .map(|&id| {
                if id == 0 || id as usize > self.len() {
                    Err(Error::effect_id_out_of_range(id, self.len()))
                } else {
                    Ok(id as usize - 1)
                }
            })
            .collect()
    }
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))?;

    let column = match column.dtype() {
        DataType::Float64 => column.clone(),
        DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => column.cast(&DataType::Float64)?,
        dt => {
            return Err(Error::InvalidColumn(format!(
                "{name}: expected a numeric column, got {dt:?}"
            )));
        }
    };

    let ca = column.f64()?;
    ca.into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                Error::InvalidInput(format!("column {name:?} has a null at row {row}"))
            })
        })
        .collect()
}

fn key_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))?;
    let column = column
        .cast(&DataType::String)
        .map_err(|_| Error::InvalidColumn(format!("{name}: not castable to a string key")))?;

    let ca = column.str()?;
    ca.into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_owned).ok_or_else(|| {
                Error::InvalidInput(format!("column {name:?} has a null at row {row}"))
            })
        })
        .collect()
}
