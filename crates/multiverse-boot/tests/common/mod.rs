//! Common test utilities for multiverse-boot tests

use multiverse_core::{ColumnMap, Specification};
use polars::prelude::*;
use std::path::PathBuf;

/// Small synthetic meta-analytic dataset: six effects in four studies and
/// two clusters
pub fn meta_dataset() -> DataFrame {
    df![
        "es"    => [0.21, 0.34, 0.12, 0.44, 0.05, 0.30],
        "var"   => [0.04, 0.05, 0.03, 0.06, 0.02, 0.05],
        "study" => ["s1", "s1", "s2", "s3", "s4", "s4"],
        "lab"   => ["l1", "l1", "l1", "l2", "l2", "l2"],
    ]
    .unwrap()
}

pub fn colmap() -> ColumnMap {
    ColumnMap::new("es", "var", "study")
}

/// Five specifications over four distinct effect-ID sets (rows 2 and 4
/// share one)
pub fn specifications() -> Vec<Specification> {
    vec![
        Specification::new("1,2,3,4,5,6", 0.24),
        Specification::new("1,2", 0.27),
        Specification::new("3,4", 0.28),
        Specification::new("1,2", 0.27),
        Specification::new("5,6", 0.18),
    ]
}

/// Unique temp-file path for one test
pub fn temp_csv(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("multiverse_{}_{}.csv", name, std::process::id()))
}
