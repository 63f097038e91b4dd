//! Report builders.
//!
//! A report loads every category of one criterion group, groups the rows by
//! `file` and renders one chart per group: a box plot for the `simple`
//! benchmark, a `k` trend otherwise.

pub mod collisions;
pub mod hashes;
pub mod impls;

use crate::chart::{self, Distribution, TrendLine};
use crate::config::AnalysisConfig;
use crate::dataset;
use crate::error::{AnalysisError, Result};
use crate::sample::{Sample, SIMPLE_FILE, SIMPLE_K};
use crate::schema::{summarize, ChartKind, ChartRecord};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;

const Y_DESC: &str = "ms";
const X_DESC: &str = "k";

/// Splits trend charts into variants with and without one function.
#[derive(Clone, Copy, Debug)]
pub struct SplitRule {
    pub function: &'static str,
    /// Used in the output name: `<report>_<file>_with_<label>.png`.
    pub label: &'static str,
}

/// A report over one criterion group.
#[derive(Clone, Copy, Debug)]
pub struct ReportSpec {
    /// Output name prefix.
    pub name: &'static str,
    /// Criterion group directory under the criterion root.
    pub group: &'static str,
    /// Sub-directories of `group` to load, in order.
    pub categories: &'static [&'static str],
    pub split: Option<SplitRule>,
}

impl ReportSpec {
    /// Load every category, tagging untagged rows with their category.
    pub fn load(&self, cfg: &AnalysisConfig) -> Result<Vec<Sample>> {
        let mut samples = Vec::new();
        for category in self.categories {
            let loaded = dataset::load(cfg.category_dir(self.group, category))?;
            if loaded.is_empty() {
                warn!("{}: no samples for category {}", self.name, category);
            }
            samples.extend(loaded.into_iter().map(|mut s| {
                if s.function.is_empty() {
                    s.function = category.to_string();
                }
                s
            }));
        }
        Ok(samples)
    }

    pub fn output_name(&self, file: &str, variant: Option<&str>) -> String {
        let file = sanitize(file);
        match variant {
            Some(v) => format!("{}_{}_{}.png", self.name, file, v),
            None => format!("{}_{}.png", self.name, file),
        }
    }
}

/// Chart drawn for a `file` group.
pub fn chart_kind(file: &str) -> ChartKind {
    if file == SIMPLE_FILE {
        ChartKind::Distribution
    } else {
        ChartKind::Trend
    }
}

fn sanitize(file: &str) -> String {
    file.replace(['/', '\\'], "_")
}

/// Group rows by `file`, groups in first-appearance order.
pub fn group_by_file(samples: &[Sample]) -> Vec<(&str, Vec<&Sample>)> {
    let mut groups: Vec<(&str, Vec<&Sample>)> = Vec::new();
    for s in samples {
        match groups.iter_mut().find(|(f, _)| *f == s.file) {
            Some((_, rows)) => rows.push(s),
            None => groups.push((s.file.as_str(), vec![s])),
        }
    }
    groups
}

/// `iter_time` values per function, functions in first-appearance order.
pub fn distributions(samples: &[&Sample]) -> Vec<Distribution> {
    let mut out: Vec<Distribution> = Vec::new();
    for s in samples {
        match out.iter_mut().find(|d| d.function == s.function) {
            Some(d) => d.values.push(s.iter_time),
            None => out.push(Distribution {
                function: s.function.clone(),
                values: vec![s.iter_time],
            }),
        }
    }
    out
}

/// Mean `iter_time` per `k`, one line per function.
pub fn trend_lines(samples: &[&Sample]) -> Vec<TrendLine> {
    let mut acc: Vec<(String, BTreeMap<i64, (f64, usize)>)> = Vec::new();
    for s in samples {
        let idx = match acc.iter().position(|(f, _)| *f == s.function) {
            Some(idx) => idx,
            None => {
                acc.push((s.function.clone(), BTreeMap::new()));
                acc.len() - 1
            }
        };
        let slot = acc[idx].1.entry(s.k).or_insert((0.0, 0));
        slot.0 += s.iter_time;
        slot.1 += 1;
    }

    acc.into_iter()
        .map(|(function, by_k)| TrendLine {
            function,
            points: by_k
                .into_iter()
                .map(|(k, (sum, n))| (k, sum / n as f64))
                .collect(),
        })
        .collect()
}

/// Render one group (or a filtered subset of it) and describe what was written.
///
/// Returns `None` without touching the disk when `samples` is empty.
pub(crate) fn render_group(
    cfg: &AnalysisConfig,
    spec: &ReportSpec,
    file: &str,
    variant: Option<&str>,
    samples: &[&Sample],
) -> Result<Option<ChartRecord>> {
    if samples.is_empty() {
        warn!("{}: no samples for {}, skipping chart", spec.name, file);
        return Ok(None);
    }

    let kind = chart_kind(file);
    let path = cfg.output_path(&spec.output_name(file, variant));
    match kind {
        ChartKind::Distribution => {
            let title = format!("{}, k={}", file, SIMPLE_K);
            chart::render_distribution(&path, &title, Y_DESC, &distributions(samples))?;
        }
        _ => {
            chart::render_trend(&path, file, X_DESC, Y_DESC, &trend_lines(samples))?;
        }
    }
    info!("wrote {}", path.display());

    Ok(Some(ChartRecord {
        report: spec.name.to_string(),
        file: file.to_string(),
        kind,
        output: path.to_string_lossy().to_string(),
        functions: summarize(samples),
    }))
}

/// Load, group and render a whole report.
pub fn run(cfg: &AnalysisConfig, spec: &ReportSpec) -> Result<Vec<ChartRecord>> {
    let samples = spec.load(cfg)?;
    if samples.is_empty() {
        warn!(
            "{}: no samples under {}",
            spec.name,
            cfg.criterion_dir.join(spec.group).display()
        );
        return Ok(Vec::new());
    }

    fs::create_dir_all(cfg.out_dir()).map_err(|e| AnalysisError::io(cfg.out_dir(), e))?;

    let mut charts = Vec::new();
    for (file, rows) in group_by_file(&samples) {
        let split = spec.split.filter(|_| chart_kind(file) == ChartKind::Trend);
        match split {
            None => charts.extend(render_group(cfg, spec, file, None, &rows)?),
            Some(rule) => {
                if rows.iter().any(|s| s.function == rule.function) {
                    let with = format!("with_{}", rule.label);
                    charts.extend(render_group(cfg, spec, file, Some(&with), &rows)?);
                }

                let without: Vec<&Sample> = rows
                    .iter()
                    .copied()
                    .filter(|s| s.function != rule.function)
                    .collect();
                let variant = format!("without_{}", rule.label);
                charts.extend(render_group(cfg, spec, file, Some(&variant), &without)?);
            }
        }
    }

    Ok(charts)
}
