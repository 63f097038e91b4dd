use super::{ReportSpec, SplitRule};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::schema::ChartRecord;

/// The rolling Adler variant is far slower than the rest, so trend charts are
/// also drawn without it.
pub const ROLLING_ADLER_IMPL: &str = "naive_prereserve_iter_rolling_adler_shorter_substring";

/// Substring implementations compared inside criterion's `Substring` group.
pub const IMPLEMENTATIONS: &[&str] = &[
    "naive_substring",
    "naive_prereserve_substring",
    "naive_prereserve_iter_substring",
    "naive_prereserve_iter_fx_substring",
    "naive_prereserve_iter_fx_shorter_substring",
    ROLLING_ADLER_IMPL,
    "naive_prereserve_iter_rolling_poly_shorter_substring",
    "alternate_prereserve_iter_fx_substring",
];

pub const IMPLS: ReportSpec = ReportSpec {
    name: "impls",
    group: "Substring",
    categories: IMPLEMENTATIONS,
    split: Some(SplitRule {
        function: ROLLING_ADLER_IMPL,
        label: "adler",
    }),
};

/// Writes `impls_simple.png` plus `impls_<file>_with_adler.png` (when the
/// Adler variant ran on that file) and `impls_<file>_without_adler.png`.
pub fn run(cfg: &AnalysisConfig) -> Result<Vec<ChartRecord>> {
    super::run(cfg, &IMPLS)
}
