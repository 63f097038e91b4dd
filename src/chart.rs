//! PNG rendering of the three chart kinds.
//!
//! Each function/series is coloured by its index in the input, so the same
//! ordering gives the same colours across charts of one report.

use crate::error::{AnalysisError, Result};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1024, 768);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

/// Samples of one function for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub function: String,
    pub values: Vec<f64>,
}

/// `(k, mean iter_time)` points of one function, sorted by `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub function: String,
    pub points: Vec<(i64, f64)>,
}

/// One bar per category; `None` leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

fn plot_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Plot(e.to_string())
}

fn color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

fn padded_f32(lo: f32, hi: f32) -> (f32, f32) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (hi.abs() * 0.1).max(1e-6)
    };
    (lo - pad, hi + pad)
}

/// Box plot of each function's values, Tukey fences with outliers as dots.
pub fn render_distribution(
    path: &Path,
    title: &str,
    y_desc: &str,
    groups: &[Distribution],
) -> Result<()> {
    let groups: Vec<&Distribution> = groups.iter().filter(|g| !g.values.is_empty()).collect();
    if groups.is_empty() {
        return Err(AnalysisError::EmptyChart(title.to_string()));
    }

    let quartiles: Vec<Quartiles> = groups.iter().map(|g| Quartiles::new(g.values.as_slice())).collect();

    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    let mut data_min = f32::INFINITY;
    for (g, q) in groups.iter().zip(&quartiles) {
        for v in q.values() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        for &v in &g.values {
            data_min = data_min.min(v as f32);
            lo = lo.min(v as f32);
            hi = hi.max(v as f32);
        }
    }
    let (mut lo, hi) = padded_f32(lo, hi);
    if data_min >= 0.0 {
        lo = lo.max(0.0);
    }

    let labels: Vec<&str> = groups.iter().map(|g| g.function.as_str()).collect();
    let box_width = (SIZE.0 / (labels.len() as u32 * 2)).clamp(10, 60);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(labels[..].into_segmented(), lo..hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("function")
        .y_desc(y_desc)
        .label_style(LABEL_FONT)
        .x_label_formatter(&|v| match v {
            SegmentValue::Exact(s) | SegmentValue::CenterOf(s) => s.to_string(),
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(quartiles.iter().enumerate().map(|(i, q)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(&labels[i]), q)
                .width(box_width)
                .whisker_width(0.5)
                .style(color(i))
        }))
        .map_err(plot_err)?;

    let mut outliers = Vec::new();
    for (i, (g, q)) in groups.iter().zip(&quartiles).enumerate() {
        let [lower, _, _, _, upper] = q.values();
        for &v in &g.values {
            let v = v as f32;
            if v < lower || v > upper {
                outliers.push(Circle::new(
                    (SegmentValue::CenterOf(&labels[i]), v),
                    3,
                    color(i).filled(),
                ));
            }
        }
    }
    chart.draw_series(outliers).map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// One line per function through its `(k, value)` points.
pub fn render_trend(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    lines: &[TrendLine],
) -> Result<()> {
    let lines: Vec<&TrendLine> = lines.iter().filter(|l| !l.points.is_empty()).collect();
    if lines.is_empty() {
        return Err(AnalysisError::EmptyChart(title.to_string()));
    }

    let points = lines.iter().flat_map(|l| l.points.iter());
    let (mut k_min, mut k_max, mut y_max) = (i64::MAX, i64::MIN, 0.0f64);
    for &(k, y) in points {
        k_min = k_min.min(k);
        k_max = k_max.max(k);
        y_max = y_max.max(y);
    }
    if k_min == k_max {
        k_min -= 1;
        k_max += 1;
    }
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(k_min..k_max, 0f64..y_top)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(plot_err)?;

    for (i, line) in lines.iter().enumerate() {
        let c = color(i);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), c.stroke_width(2)))
            .map_err(plot_err)?
            .label(line.function.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], c.stroke_width(2)));
        chart
            .draw_series(line.points.iter().map(|&p| Circle::new(p, 3, c.filled())))
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(LABEL_FONT)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Grouped bars: one group per category, one bar per series inside it.
pub fn render_bars(
    path: &Path,
    x_desc: &str,
    y_desc: &str,
    categories: &[String],
    series: &[BarSeries],
) -> Result<()> {
    let y_max = series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if categories.is_empty() || series.is_empty() || !y_max.is_finite() {
        return Err(AnalysisError::EmptyChart(path.display().to_string()));
    }
    let y_top = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

    let n = categories.len();
    let slot = 0.8 / series.len() as f64;

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..n as f64, 0f64..y_top)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(LABEL_FONT)
        .x_labels(n * 2 + 1)
        .x_label_formatter(&|x| {
            // only label the centre of each group
            let idx = x.floor();
            if idx >= 0.0 && (x - idx - 0.5).abs() < 1e-9 {
                categories.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .draw()
        .map_err(plot_err)?;

    for (j, s) in series.iter().enumerate() {
        let c = color(j);
        let bars = s.values.iter().enumerate().filter_map(|(i, v)| {
            let v = (*v)?;
            let x0 = i as f64 + 0.1 + j as f64 * slot;
            Some(Rectangle::new([(x0, 0.0), (x0 + slot, v)], c.filled()))
        });
        chart
            .draw_series(bars)
            .map_err(plot_err)?
            .label(s.name.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], c.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(LABEL_FONT)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
