//! Per-sample records and the normalization applied to every row.
//!
//! criterion writes one `raw.csv` per benchmark id. Each row is a single
//! sample: `sample_measured_value` nanoseconds spent over `iteration_count`
//! iterations of `function`, run against the input named by `value`.
//!
//! `value` is `<file>_<k>`. `<file>` may itself contain underscores, so the
//! split is always on the last one.

use crate::error::SampleError;
use serde::Serialize;

/// Benchmark whose `value` carries no meaningful `k`.
pub const SIMPLE_FILE: &str = "simple";

/// `k` assigned to every [`SIMPLE_FILE`] row.
pub const SIMPLE_K: i64 = 5;

const NANOS_PER_MILLI: f64 = 1e6;

/// One row as read from `raw.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub value: String,
    pub sample_measured_value: f64,
    pub iteration_count: u64,
    pub function: String,
}

/// A raw row annotated with `file`, `k` and the per-iteration time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub value: String,
    pub sample_measured_value: f64,
    pub iteration_count: u64,
    pub function: String,

    pub file: String,
    pub k: i64,
    /// Milliseconds per iteration.
    pub iter_time: f64,
}

/// Split `value` on its last underscore.
///
/// Returns the whole value and `None` when there is no underscore.
pub fn split_value(value: &str) -> (&str, Option<&str>) {
    match value.rfind('_') {
        Some(idx) => (&value[..idx], Some(&value[idx + 1..])),
        None => (value, None),
    }
}

/// Resolve `k` for a row. `simple` rows ignore whatever token they carry.
pub fn resolve_k(value: &str, file: &str, token: Option<&str>) -> Result<i64, SampleError> {
    if file == SIMPLE_FILE {
        return Ok(SIMPLE_K);
    }

    let token = token.ok_or_else(|| SampleError::MissingK {
        value: value.to_string(),
    })?;

    token.trim().parse::<i64>().map_err(|_| SampleError::InvalidK {
        value: value.to_string(),
        token: token.to_string(),
    })
}

/// Per-iteration time in milliseconds from a sample total in nanoseconds.
pub fn iter_time_ms(sample_measured_value: f64, iteration_count: u64) -> Result<f64, SampleError> {
    if iteration_count == 0 {
        return Err(SampleError::ZeroIterations);
    }
    if !sample_measured_value.is_finite() {
        return Err(SampleError::NonFiniteMeasurement(sample_measured_value));
    }
    if sample_measured_value < 0.0 {
        return Err(SampleError::NegativeMeasurement(sample_measured_value));
    }
    Ok(sample_measured_value / iteration_count as f64 / NANOS_PER_MILLI)
}

impl Sample {
    pub fn from_raw(raw: RawSample) -> Result<Self, SampleError> {
        let (file, token) = split_value(&raw.value);
        let k = resolve_k(&raw.value, file, token)?;
        let file = file.to_string();
        let iter_time = iter_time_ms(raw.sample_measured_value, raw.iteration_count)?;

        Ok(Self {
            value: raw.value,
            sample_measured_value: raw.sample_measured_value,
            iteration_count: raw.iteration_count,
            function: raw.function,
            file,
            k,
            iter_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: &str, measured: f64, iters: u64, function: &str) -> RawSample {
        RawSample {
            value: value.to_string(),
            sample_measured_value: measured,
            iteration_count: iters,
            function: function.to_string(),
        }
    }

    #[test]
    fn test_split_uses_last_underscore() {
        let value = "war_and_peace.txt_anna_karenina.txt_20";
        let (file, token) = split_value(value);
        assert_eq!(file, "war_and_peace.txt_anna_karenina.txt");
        assert_eq!(token, Some("20"));
        assert_eq!(format!("{}_{}", file, token.unwrap()), value);
    }

    #[test]
    fn test_split_without_underscore() {
        assert_eq!(split_value("simple"), ("simple", None));
        assert_eq!(split_value("trailing_"), ("trailing", Some("")));
    }

    #[test]
    fn test_linear_row() {
        let s = Sample::from_raw(raw("linear_10", 5_000_000.0, 100, "fx")).unwrap();
        assert_eq!(s.file, "linear");
        assert_eq!(s.k, 10);
        assert!((s.iter_time - 0.05).abs() < 1e-12);
        assert_eq!(s.function, "fx");
    }

    #[test]
    fn test_iter_time_relation() {
        let s = Sample::from_raw(raw("genome_320", 123_456_789.0, 37, "sip")).unwrap();
        let expected = 123_456_789.0 / 37.0 / 1e6;
        assert!((s.iter_time - expected).abs() < 1e-12);
    }

    #[test]
    fn test_simple_overrides_k() {
        let s = Sample::from_raw(raw("simple_anything", 2_000_000.0, 1000, "sip")).unwrap();
        assert_eq!(s.file, "simple");
        assert_eq!(s.k, SIMPLE_K);
        assert!((s.iter_time - 0.002).abs() < 1e-12);

        let s = Sample::from_raw(raw("simple_42", 1.0, 1, "fx")).unwrap();
        assert_eq!(s.k, SIMPLE_K);
    }

    #[test]
    fn test_bare_simple_value() {
        let s = Sample::from_raw(raw("simple", 10.0, 1, "naive_substring")).unwrap();
        assert_eq!(s.file, "simple");
        assert_eq!(s.k, SIMPLE_K);
    }

    #[test]
    fn test_non_integer_k_fails() {
        let err = Sample::from_raw(raw("linear_ten", 1.0, 1, "fx")).unwrap_err();
        assert_eq!(
            err,
            SampleError::InvalidK {
                value: "linear_ten".to_string(),
                token: "ten".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_k_fails() {
        let err = Sample::from_raw(raw("linear", 1.0, 1, "fx")).unwrap_err();
        assert!(matches!(err, SampleError::MissingK { .. }));
    }

    #[test]
    fn test_zero_iterations_fails() {
        let err = Sample::from_raw(raw("linear_10", 1.0, 0, "fx")).unwrap_err();
        assert_eq!(err, SampleError::ZeroIterations);
    }

    #[test]
    fn test_non_finite_measurement_fails() {
        let err = iter_time_ms(f64::NAN, 10).unwrap_err();
        assert!(matches!(err, SampleError::NonFiniteMeasurement(_)));
    }

    #[test]
    fn test_negative_measurement_fails() {
        let err = Sample::from_raw(raw("linear_10", -5_000_000.0, 100, "fx")).unwrap_err();
        assert_eq!(err, SampleError::NegativeMeasurement(-5_000_000.0));

        let s = Sample::from_raw(raw("linear_10", 0.0, 100, "fx")).unwrap();
        assert_eq!(s.iter_time, 0.0);
    }
}
