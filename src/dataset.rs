//! Discovery and loading of criterion sample files.
//!
//! criterion stores the samples of every benchmark id under
//! `<group>/<function>/<value>/new/raw.csv`. Loading a directory walks it for
//! every `new/raw.csv` at any depth, reads the rows in discovery order and
//! normalizes each into a [`Sample`].
//!
//! # CSV layout
//!
//! ```text
//! group,function,value,throughput_num,throughput_type,sample_measured_value,unit,iteration_count
//! Substring,naive_substring,a.txt_b.txt_20,,,1234567.0,ns,42
//! ```
//!
//! Columns are looked up by header name. Only `value`,
//! `sample_measured_value`, `iteration_count` and `function` are required.

use crate::error::{AnalysisError, Result, SampleError};
use crate::sample::{RawSample, Sample};
use csv::StringRecord;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// File name criterion gives to per-sample measurements.
pub const SAMPLE_FILE_NAME: &str = "raw.csv";

/// Directory holding the most recent run of a benchmark id.
pub const LATEST_RUN_DIR: &str = "new";

const COL_VALUE: &str = "value";
const COL_MEASURED: &str = "sample_measured_value";
const COL_ITERATIONS: &str = "iteration_count";
const COL_FUNCTION: &str = "function";

/// Header positions of the required columns in one file.
#[derive(Debug, Clone, Copy)]
struct Columns {
    value: usize,
    measured: usize,
    iterations: usize,
    function: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| AnalysisError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            value: find(COL_VALUE)?,
            measured: find(COL_MEASURED)?,
            iterations: find(COL_ITERATIONS)?,
            function: find(COL_FUNCTION)?,
        })
    }

    fn extract(&self, record: &StringRecord) -> std::result::Result<RawSample, SampleError> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let measured = field(self.measured);
        let sample_measured_value =
            measured
                .trim()
                .parse::<f64>()
                .map_err(|_| SampleError::InvalidField {
                    column: COL_MEASURED,
                    value: measured.to_string(),
                })?;

        let iterations = field(self.iterations);
        let iteration_count =
            iterations
                .trim()
                .parse::<u64>()
                .map_err(|_| SampleError::InvalidField {
                    column: COL_ITERATIONS,
                    value: iterations.to_string(),
                })?;

        Ok(RawSample {
            value: field(self.value).to_string(),
            sample_measured_value,
            iteration_count,
            function: field(self.function).to_string(),
        })
    }
}

fn is_sample_file(root: &Path, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    let mut components = rel.components().rev();
    let name = components.next().and_then(|c| c.as_os_str().to_str());
    let parent = components.next().and_then(|c| c.as_os_str().to_str());
    name == Some(SAMPLE_FILE_NAME) && parent == Some(LATEST_RUN_DIR)
}

/// Find every `new/raw.csv` below `root`, in lexicographic walk order.
///
/// A missing root is not an error: it simply has no samples.
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        debug!("{} is not a directory, nothing to load", root.display());
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_sample_file(root, entry.path()) {
            debug!("found sample file {}", entry.path().display());
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

/// Read and normalize one `raw.csv`.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let csv_err = |source| AnalysisError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = Columns::locate(&headers, path)?;

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let sample = columns
            .extract(&record)
            .and_then(Sample::from_raw)
            .map_err(|source| AnalysisError::Sample {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        samples.push(sample);
    }

    Ok(samples)
}

/// Load every sample file below `root` into one table.
///
/// Rows keep discovery order, then in-file order. Nothing is sorted or
/// deduplicated.
pub fn load<P: AsRef<Path>>(root: P) -> Result<Vec<Sample>> {
    let root = root.as_ref();
    let files = discover(root)?;

    let mut samples = Vec::new();
    for file in &files {
        samples.extend(load_file(file)?);
    }

    info!(
        "loaded {} samples from {} files under {}",
        samples.len(),
        files.len(),
        root.display()
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SIMPLE_K;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "group,function,value,throughput_num,throughput_type,sample_measured_value,unit,iteration_count";

    fn write_raw(root: &Path, rel: &str, rows: &[&str]) -> PathBuf {
        let dir = root.join(rel).join(LATEST_RUN_DIR);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SAMPLE_FILE_NAME);
        let mut body = String::from(HEADER);
        body.push('\n');
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let samples = load(dir.path().join("does-not-exist")).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_no_matching_files_is_empty() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("fx/linear_10/base")).unwrap();
        fs::write(dir.path().join("fx/linear_10/base/raw.csv"), HEADER).unwrap();
        fs::write(dir.path().join("fx/raw.csv"), HEADER).unwrap();

        assert!(discover(dir.path()).unwrap().is_empty());
        assert!(load(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_sorted_and_nested() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), "b/linear_20", &[]);
        write_raw(dir.path(), "a/deep/er/linear_10", &[]);
        write_raw(dir.path(), "", &[]);

        let found = discover(dir.path()).unwrap();
        let rel: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/deep/er/linear_10/new/raw.csv"),
                PathBuf::from("b/linear_20/new/raw.csv"),
                PathBuf::from("new/raw.csv"),
            ]
        );
    }

    #[test]
    fn test_row_counts_are_summed() {
        let dir = tempdir().unwrap();
        write_raw(
            dir.path(),
            "fx/linear_10",
            &[
                "Hashes,fx,linear_10,,,5000000,ns,100",
                "Hashes,fx,linear_10,,,10000000,ns,200",
            ],
        );
        write_raw(
            dir.path(),
            "fx/linear_20",
            &[
                "Hashes,fx,linear_20,,,1000,ns,1",
                "Hashes,fx,linear_20,,,2000,ns,2",
                "Hashes,fx,linear_20,,,3000,ns,3",
            ],
        );
        write_raw(dir.path(), "fx/simple", &["Hashes,fx,simple,,,2000000,ns,1000"]);

        let samples = load(dir.path()).unwrap();
        assert_eq!(samples.len(), 6);

        // discovery order, then file order
        let ks: Vec<i64> = samples.iter().map(|s| s.k).collect();
        assert_eq!(ks, vec![10, 10, 20, 20, 20, SIMPLE_K]);
        assert!((samples[0].iter_time - 0.05).abs() < 1e-12);
        assert_eq!(samples[5].file, "simple");
    }

    #[test]
    fn test_columns_matched_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(
            &path,
            "iteration_count,function,sample_measured_value,value\n4,sip,8000000,genome_40\n",
        )
        .unwrap();

        let samples = load_file(&path).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].function, "sip");
        assert_eq!(samples[0].file, "genome");
        assert_eq!(samples[0].k, 40);
        assert!((samples[0].iter_time - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(&path, "function,value,sample_measured_value\nfx,linear_10,100\n").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumn {
                column: "iteration_count",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_k_fails_with_location() {
        let dir = tempdir().unwrap();
        write_raw(
            dir.path(),
            "fx/linear",
            &[
                "Hashes,fx,linear_10,,,100,ns,1",
                "Hashes,fx,linear_ten,,,100,ns,1",
            ],
        );

        match load(dir.path()).unwrap_err() {
            AnalysisError::Sample { line, source, .. } => {
                assert_eq!(line, 3);
                assert!(matches!(source, SampleError::InvalidK { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_iterations_is_fatal() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), "fx/linear_10", &["Hashes,fx,linear_10,,,100,ns,0"]);

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Sample {
                source: SampleError::ZeroIterations,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_measurement_fails() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), "fx/linear_10", &["Hashes,fx,linear_10,,,fast,ns,3"]);

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Sample {
                source: SampleError::InvalidField {
                    column: "sample_measured_value",
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_negative_measurement_is_fatal() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), "fx/linear_10", &["Hashes,fx,linear_10,,,-5000000,ns,100"]);

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Sample {
                line: 2,
                source: SampleError::NegativeMeasurement(_),
                ..
            }
        ));
    }

    #[test]
    fn test_ragged_csv_is_csv_error() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), "fx/linear_10", &["Hashes,fx,linear_10"]);

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Csv { .. }));
    }
}
