//! Meta-analysis level selection
//!
//! The level is chosen exactly once, before any iteration runs. There is no
//! default: a level outside {2, 3} is a configuration error.

use crate::{ThreeLevelAggregator, TwoLevelAggregator};
use multiverse_core::{ColumnMap, EffectIdSet, Error, Result, SummaryEffects};
use polars::prelude::DataFrame;
use rand::rngs::StdRng;

/// Depth of the hierarchical meta-analytic model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaLevel {
    /// Effects nested in studies
    Two,
    /// Effects nested in studies nested in clusters
    Three,
}

impl MetaLevel {
    /// Parse a user-supplied level, accepting exactly 2 or 3
    pub fn from_level(level: i64) -> Result<Self> {
        match level {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(Error::invalid_level(other)),
        }
    }

    /// The numeric level
    pub fn value(&self) -> i64 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Level-selected aggregator
///
/// Tagged dispatch over the two shipped [`SummaryEffects`] implementations,
/// so callers can hold one concrete type whichever level the configuration
/// names.
#[derive(Debug, Clone, Copy)]
pub enum LevelAggregator {
    Two(TwoLevelAggregator),
    Three(ThreeLevelAggregator),
}

impl LevelAggregator {
    /// Build the aggregator for a user-supplied level
    pub fn for_level(level: i64) -> Result<Self> {
        Ok(match MetaLevel::from_level(level)? {
            MetaLevel::Two => Self::Two(TwoLevelAggregator::new()),
            MetaLevel::Three => Self::Three(ThreeLevelAggregator::new()),
        })
    }

    /// The level this aggregator serves
    pub fn level(&self) -> MetaLevel {
        match self {
            Self::Two(_) => MetaLevel::Two,
            Self::Three(_) => MetaLevel::Three,
        }
    }
}

impl SummaryEffects for LevelAggregator {
    fn aggregate(
        &self,
        sets: &[EffectIdSet],
        data: &DataFrame,
        colmap: &ColumnMap,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>> {
        match self {
            Self::Two(agg) => agg.aggregate(sets, data, colmap, rng),
            Self::Three(agg) => agg.aggregate(sets, data, colmap, rng),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Two(agg) => agg.name(),
            Self::Three(agg) => agg.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_level() {
        assert_eq!(MetaLevel::from_level(2).unwrap(), MetaLevel::Two);
        assert_eq!(MetaLevel::from_level(3).unwrap(), MetaLevel::Three);
    }

    #[test]
    fn test_invalid_levels_rejected() {
        for level in [0, 1, 4, -2, 23] {
            let err = MetaLevel::from_level(level).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_for_level_dispatch() {
        let agg = LevelAggregator::for_level(2).unwrap();
        assert_eq!(agg.level(), MetaLevel::Two);
        assert_eq!(agg.name(), "two-level random effects");

        let agg = LevelAggregator::for_level(3).unwrap();
        assert_eq!(agg.level(), MetaLevel::Three);
        assert_eq!(agg.name(), "three-level random effects");

        assert!(LevelAggregator::for_level(4).is_err());
    }

    #[test]
    fn test_value_round_trip() {
        assert_eq!(MetaLevel::from_level(2).unwrap().value(), 2);
        assert_eq!(MetaLevel::from_level(3).unwrap().value(), 3);
    }
}
