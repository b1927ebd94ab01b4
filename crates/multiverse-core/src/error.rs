//! Error types for specification-curve meta-analysis
//!
//! Provides a unified error type for all multiverse-stats crates.

use thiserror::Error;

/// Core error type for multiverse bootstrap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed `set_es` value in the specification table
    #[error("malformed effect-id set {value:?}: {reason}")]
    Parse { value: String, reason: String },

    /// Invalid run configuration (level, iteration count, column map)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Internal consistency violation between two collection lengths
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Requested dataset column is missing or has the wrong type
    #[error("invalid column: {0}")]
    InvalidColumn(String),

    /// Invalid input data
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("computation error: {0}")]
    Computation(String),

    /// Dataframe error (column access, casting, CSV)
    #[error("dataframe error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// IO error (for file operations)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create a parse error for a malformed `set_es` value
    pub fn parse(value: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an error for a meta-analysis level outside {2, 3}
    pub fn invalid_level(level: i64) -> Self {
        Self::InvalidConfiguration(format!(
            "meta-analysis level must be 2 or 3, got {level}"
        ))
    }

    /// Create an error for a size mismatch
    pub fn shape_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for an effect id that does not address a dataset row
    pub fn effect_id_out_of_range(id: u32, rows: usize) -> Self {
        Self::InvalidInput(format!(
            "effect id {id} out of range for a dataset with {rows} rows"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parse("1,x", "invalid effect id \"x\"");
        assert_eq!(
            err.to_string(),
            "malformed effect-id set \"1,x\": invalid effect id \"x\""
        );

        let err = Error::invalid_level(4);
        assert_eq!(
            err.to_string(),
            "invalid configuration: meta-analysis level must be 2 or 3, got 4"
        );

        let err = Error::shape_mismatch("aggregator output", 3, 2);
        assert_eq!(
            err.to_string(),
            "shape mismatch in aggregator output: expected 3, got 2"
        );

        let err = Error::InvalidColumn("es".to_string());
        assert_eq!(err.to_string(), "invalid column: es");

        let err = Error::effect_id_out_of_range(9, 4);
        assert_eq!(
            err.to_string(),
            "invalid input: effect id 9 out of range for a dataset with 4 rows"
        );
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => assert!(err.to_string().contains("file not found")),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn check_iterations(n_iter: usize) -> Result<usize> {
            if n_iter == 0 {
                return Err(Error::InvalidConfiguration(
                    "iteration count must be positive".to_string(),
                ));
            }
            Ok(n_iter)
        }

        assert_eq!(check_iterations(100).unwrap(), 100);
        assert!(check_iterations(0).is_err());
    }
}
