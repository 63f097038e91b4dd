use super::ReportSpec;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::schema::ChartRecord;

/// Hash functions compared inside criterion's `Hashes` group.
pub const HASH_FUNCTIONS: &[&str] = &["sip", "fx", "rolling_adler", "rolling_poly"];

pub const HASHES: ReportSpec = ReportSpec {
    name: "hashes",
    group: "Hashes",
    categories: HASH_FUNCTIONS,
    split: None,
};

/// Writes `hashes_<file>.png` for every input file.
pub fn run(cfg: &AnalysisConfig) -> Result<Vec<ChartRecord>> {
    super::run(cfg, &HASHES)
}
