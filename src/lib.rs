use clap::ValueEnum;

pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod reports;
pub mod sample;
pub mod schema;

pub use error::{AnalysisError, Result, SampleError};
pub use sample::Sample;

/// Report(s) to generate.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum ReportKind {
    /// Hash comparison, implementation comparison, then collision summary.
    #[default]
    All,
    /// Hash function comparison (`hashes_<file>.png`).
    Hashes,
    /// Substring implementation comparison (`impls_<file>*.png`).
    Impls,
    /// Unique hash counts per hash function (`collisions.png`).
    Collisions,
}

impl ReportKind {
    pub fn includes(&self, other: ReportKind) -> bool {
        *self == ReportKind::All || *self == other
    }
}
