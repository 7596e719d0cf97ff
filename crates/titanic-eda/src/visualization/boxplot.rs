//! Horizontal box-and-whisker plot.

use super::palette::{OUTLINE, PRIMARY};
use super::{padded_range, TITLE_FONT};
use crate::config::FigureSize;
use crate::error::{EdaError, Result};
use crate::profiler::statistics::{min_max, BoxplotStats};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

// vertical extent of the box and the whisker caps
const BOX_LOW: f64 = 0.1;
const BOX_HIGH: f64 = 0.9;
const CAP_LOW: f64 = 0.3;
const CAP_HIGH: f64 = 0.7;
const CENTER: f64 = 0.5;

/// Draw the boxplot of `values` to `path`.
pub fn draw_boxplot(path: &Path, feature: &str, values: &[f64], size: FigureSize) -> Result<()> {
    let stats = BoxplotStats::from_values(values)
        .ok_or_else(|| EdaError::NoValidValues(feature.to_string()))?;
    debug!(
        "{}: box {:.3}..{:.3}, median {:.3}, {} fliers",
        feature,
        stats.q1,
        stats.q3,
        stats.median,
        stats.fliers.len()
    );

    let (lo, hi) = min_max(values).ok_or_else(|| EdaError::NoValidValues(feature.to_string()))?;
    let (x_min, x_max) = padded_range(lo, hi);

    let root = BitMapBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Boxplot of {}", feature), TITLE_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(20)
        .build_cartesian_2d(x_min..x_max, 0f64..1f64)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_desc(feature)
        .draw()?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(stats.q1, BOX_LOW), (stats.q3, BOX_HIGH)],
        PRIMARY.filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(stats.q1, BOX_LOW), (stats.q3, BOX_HIGH)],
        OUTLINE.stroke_width(2),
    )))?;

    let lines = [
        // median
        vec![(stats.median, BOX_LOW), (stats.median, BOX_HIGH)],
        // whiskers
        vec![(stats.whisker_low, CENTER), (stats.q1, CENTER)],
        vec![(stats.q3, CENTER), (stats.whisker_high, CENTER)],
        // caps
        vec![(stats.whisker_low, CAP_LOW), (stats.whisker_low, CAP_HIGH)],
        vec![(stats.whisker_high, CAP_LOW), (stats.whisker_high, CAP_HIGH)],
    ];
    chart.draw_series(
        lines
            .into_iter()
            .map(|points| PathElement::new(points, OUTLINE.stroke_width(2))),
    )?;

    chart.draw_series(
        stats
            .fliers
            .iter()
            .map(|&x| Circle::new((x, CENTER), 4, OUTLINE.stroke_width(1))),
    )?;

    root.present()?;
    Ok(())
}
