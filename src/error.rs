//! Error types shared by the loader, the report builders and the renderer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures while turning one CSV record into a [`crate::sample::Sample`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// `value` has no `_<k>` suffix and is not the `simple` benchmark
    #[error("value {value:?} has no trailing _<k> token")]
    MissingK { value: String },

    /// Trailing token of `value` is not an integer
    #[error("k token {token:?} in value {value:?} is not an integer")]
    InvalidK { value: String, token: String },

    /// Numeric column could not be parsed
    #[error("column {column} has non-numeric value {value:?}")]
    InvalidField { column: &'static str, value: String },

    /// `iteration_count` of zero would make the per-iteration time infinite
    #[error("iteration_count is zero")]
    ZeroIterations,

    /// `sample_measured_value` is NaN or infinite
    #[error("sample_measured_value {0} is not finite")]
    NonFiniteMeasurement(f64),

    /// Durations cannot be negative
    #[error("sample_measured_value {0} is negative")]
    NegativeMeasurement(f64),
}

/// Top-level error for a run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// IO error on a specific path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below an existing root
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Malformed CSV
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column absent from a sample file
    #[error("{} is missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A record could not be normalized
    #[error("{}:{line}: {source}", path.display())]
    Sample {
        path: PathBuf,
        line: u64,
        #[source]
        source: SampleError,
    },

    /// Renderer called without anything to draw
    #[error("nothing to draw for chart {0}")]
    EmptyChart(String),

    /// plotters drawing or PNG encoding failure
    #[error("plot error: {0}")]
    Plot(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
