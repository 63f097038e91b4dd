use crate::sample::Sample;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SCHEMA_VERSION: u32 = 1;

/// Environment variables checked, in order, for the commit being analysed.
const REVISION_VARS: [&str; 2] = ["GIT_SHA", "GITHUB_SHA"];
const REVISION_LEN: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub tool_version: String,
    pub criterion_dir: String,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

impl RunMeta {
    /// Metadata for a run over `criterion_dir`, stamped now.
    pub fn capture(criterion_dir: &Path) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let revision = REVISION_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .map(|sha| short_revision(&sha));

        Self {
            schema_version: SCHEMA_VERSION,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            criterion_dir: criterion_dir.display().to_string(),
            timestamp_utc: format!("unix:{secs}"),
            git_sha: revision,
        }
    }
}

fn short_revision(sha: &str) -> String {
    sha.trim().chars().take(REVISION_LEN).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Box plot of `iter_time` per function.
    Distribution,
    /// Mean `iter_time` against `k`, one line per function.
    Trend,
    /// Grouped bars (collision counts).
    Bars,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSummary {
    pub function: String,
    pub samples: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRecord {
    pub report: String,
    pub file: String,
    pub kind: ChartKind,
    pub output: String,
    pub functions: Vec<FunctionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run: RunMeta,
    pub charts: Vec<ChartRecord>,
}

/// Per-function iteration-time stats, functions in first-appearance order.
pub fn summarize(samples: &[&Sample]) -> Vec<FunctionSummary> {
    let mut out: Vec<FunctionSummary> = Vec::new();
    for s in samples {
        match out.iter_mut().find(|f| f.function == s.function) {
            Some(f) => {
                f.samples += 1;
                f.mean_ms += s.iter_time;
                f.min_ms = f.min_ms.min(s.iter_time);
                f.max_ms = f.max_ms.max(s.iter_time);
            }
            None => out.push(FunctionSummary {
                function: s.function.clone(),
                samples: 1,
                mean_ms: s.iter_time,
                min_ms: s.iter_time,
                max_ms: s.iter_time,
            }),
        }
    }

    // mean_ms holds the running sum until here
    for f in &mut out {
        f.mean_ms /= f.samples as f64;
    }
    out
}
