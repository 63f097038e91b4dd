//! Unique hash counts per hash function.
//!
//! The counts come from hashing every k=20 window of two reference texts.
//! They are small enough to ship as a built-in table; a JSON array of
//! [`CollisionEntry`] can be supplied instead.

use crate::chart::{self, BarSeries};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::schema::{ChartKind, ChartRecord};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const OUTPUT_NAME: &str = "collisions.png";

const Y_DESC: &str = "unique hashes (in millions)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEntry {
    pub file: String,
    pub function: String,
    pub unique_hashes: u64,
}

fn entry(file: &str, function: &str, unique_hashes: u64) -> CollisionEntry {
    CollisionEntry {
        file: file.to_string(),
        function: function.to_string(),
        unique_hashes,
    }
}

pub fn default_table() -> Vec<CollisionEntry> {
    vec![
        entry("war_and_peace_tolstoy.txt", "sip", 3_078_478),
        entry("war_and_peace_tolstoy.txt", "rolling_poly", 3_078_478),
        entry("war_and_peace_tolstoy.txt", "rolling_adler", 1_333_723),
        entry("war_and_peace_tolstoy.txt", "fx", 3_078_478),
        entry("monkeypox-genome.txt", "sip", 242_651),
        entry("monkeypox-genome.txt", "rolling_poly", 242_651),
        entry("monkeypox-genome.txt", "rolling_adler", 113_818),
        entry("monkeypox-genome.txt", "fx", 242_651),
    ]
}

pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<CollisionEntry>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Files on the x axis and one bar series per function, in first-appearance
/// order. Counts are converted to millions.
pub fn bar_layout(table: &[CollisionEntry]) -> (Vec<String>, Vec<BarSeries>) {
    let mut files: Vec<String> = Vec::new();
    for e in table {
        if !files.contains(&e.file) {
            files.push(e.file.clone());
        }
    }

    let mut series: Vec<BarSeries> = Vec::new();
    for e in table {
        let col = files.iter().position(|f| *f == e.file).unwrap_or(0);
        let idx = match series.iter().position(|s| s.name == e.function) {
            Some(idx) => idx,
            None => {
                series.push(BarSeries {
                    name: e.function.clone(),
                    values: vec![None; files.len()],
                });
                series.len() - 1
            }
        };
        series[idx].values[col] = Some(e.unique_hashes as f64 / 1e6);
    }

    (files, series)
}

/// Writes `collisions.png`.
pub fn run(cfg: &AnalysisConfig, table: &[CollisionEntry]) -> Result<Vec<ChartRecord>> {
    if table.is_empty() {
        warn!("collisions: empty table, skipping chart");
        return Ok(Vec::new());
    }

    fs::create_dir_all(cfg.out_dir()).map_err(|e| AnalysisError::io(cfg.out_dir(), e))?;

    let (files, series) = bar_layout(table);
    let path = cfg.output_path(OUTPUT_NAME);
    chart::render_bars(&path, "file", Y_DESC, &files, &series)?;
    info!("wrote {}", path.display());

    Ok(vec![ChartRecord {
        report: "collisions".to_string(),
        file: files.join(","),
        kind: ChartKind::Bars,
        output: path.to_string_lossy().to_string(),
        functions: Vec::new(),
    }])
}
