//! Specification table types and effect-ID-set deduplication
//!
//! One specification is one analytic choice in the multiverse: the subset of
//! effect observations it aggregates (`set_es`, a comma-joined list of
//! integer effect ids) together with its observed summary effect (`mean`).
//! Row order in the table defines each specification's rank.
//!
//! Many specifications share the same effect-ID set, so the bootstrap only
//! invokes the summary-effect aggregator once per *distinct* set per
//! iteration. [`distinct_effect_sets`] performs that reduction and keeps the
//! mapping back to specification positions.

use crate::error::{Error, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

/// One row of the specification table
///
/// Specifications are immutable inputs; identity is positional (the row
/// index defines the output rank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Comma-joined integer ids of the effect observations this
    /// specification aggregates
    pub set_es: String,
    /// Observed (non-bootstrapped) summary effect, precomputed upstream
    pub mean: f64,
}

impl Specification {
    /// Create a new specification
    pub fn new(set_es: impl Into<String>, mean: f64) -> Self {
        Self {
            set_es: set_es.into(),
            mean,
        }
    }

    /// Parse the `set_es` string into an [`EffectIdSet`]
    pub fn effect_ids(&self) -> Result<EffectIdSet> {
        self.set_es.parse()
    }
}

/// The parsed effect-ID set of a specification
///
/// Deduplication happens on the parsed integer sequence, so `"1, 2"` and
/// `"1,2"` are the same set while `"2,1"` is a different one (id order is
/// preserved, matching the upstream tables that produce these strings).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectIdSet(Vec<u32>);

impl EffectIdSet {
    /// The effect ids in this set, in their original order
    pub fn ids(&self) -> &[u32] {
        &self.0
    }

    /// Number of effect observations in this set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty (cannot happen for parsed sets)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for EffectIdSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::parse(s, "empty effect-id set"));
        }
        let ids = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<u32>()
                    .map_err(|e| Error::parse(s, format!("invalid effect id {token:?}: {e}")))
            })
            .collect::<Result<Vec<u32>>>()?;
        Ok(Self(ids))
    }
}

impl std::fmt::Display for EffectIdSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

/// The distinct effect-ID sets of a specification table
///
/// `sets` holds every distinct set in a deterministic (lexicographically
/// sorted) order; `membership[i]` is the index into `sets` of specification
/// `i`'s set. The distinct count is always <= the specification count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctSets {
    sets: Vec<EffectIdSet>,
    membership: Vec<usize>,
}

impl DistinctSets {
    /// The distinct effect-ID sets
    pub fn sets(&self) -> &[EffectIdSet] {
        &self.sets
    }

    /// Specification index -> index into [`DistinctSets::sets`]
    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    /// Number of distinct sets
    pub fn n_sets(&self) -> usize {
        self.sets.len()
    }

    /// Number of specifications the table was built from
    pub fn n_specifications(&self) -> usize {
        self.membership.len()
    }
}

/// Reduce a specification table to its distinct effect-ID sets
///
/// Parses every `set_es` value (failing on the first malformed one) and
/// returns the distinct parsed sets together with the per-specification
/// membership mapping. Pure function of the table; the set order only needs
/// to be deterministic, since per-iteration results are re-sorted downstream.
pub fn distinct_effect_sets(specs: &[Specification]) -> Result<DistinctSets> {
    let parsed = specs
        .iter()
        .map(|s| s.effect_ids())
        .collect::<Result<Vec<EffectIdSet>>>()?;

    let sets: Vec<EffectIdSet> = parsed
        .iter()
        .cloned()
        .collect::<BTreeSet<EffectIdSet>>()
        .into_iter()
        .collect();
    let index: BTreeMap<&EffectIdSet, usize> =
        sets.iter().enumerate().map(|(i, s)| (s, i)).collect();
    let membership = parsed.iter().map(|set| index[set]).collect();

    Ok(DistinctSets { sets, membership })
}

/// Read a specification table from a polars `DataFrame`
///
/// Expects a `set_es` string column and a numeric `mean` column; row order
/// is preserved.
pub fn specifications_from_dataframe(df: &DataFrame) -> Result<Vec<Specification>> {
    let set_es = df
        .column("set_es")
        .map_err(|_| Error::InvalidColumn("set_es".to_string()))?
        .str()?;
    let mean = df
        .column("mean")
        .map_err(|_| Error::InvalidColumn("mean".to_string()))?
        .cast(&DataType::Float64)?;
    let mean = mean.f64()?;

    set_es
        .into_iter()
        .zip(mean.into_iter())
        .enumerate()
        .map(|(row, (set, mean))| {
            let set = set.ok_or_else(|| {
                Error::InvalidInput(format!("specification table has a null set_es at row {row}"))
            })?;
            let mean = mean.ok_or_else(|| {
                Error::InvalidInput(format!("specification table has a null mean at row {row}"))
            })?;
            Ok(Specification::new(set, mean))
        })
        .collect()
}

/// Read a specification table from a CSV file with a header row
pub fn read_specifications(path: impl AsRef<Path>) -> Result<Vec<Specification>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    specifications_from_dataframe(&df)
}
