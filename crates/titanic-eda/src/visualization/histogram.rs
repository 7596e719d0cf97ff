//! Histogram with an overlaid density curve.

use super::palette::PRIMARY;
use super::{padded_range, TITLE_FONT};
use crate::config::FigureSize;
use crate::error::{EdaError, Result};
use crate::profiler::statistics::{auto_bin_edges, histogram_counts, KdeCurve};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// Grid points of the density curve.
const KDE_GRIDSIZE: usize = 200;

/// Draw the histogram of `values` to `path`.
///
/// Bars count values per bin; the density curve spans the data range only
/// and is scaled to the count axis.
pub fn draw_histogram(path: &Path, feature: &str, values: &[f64], size: FigureSize) -> Result<()> {
    let edges = auto_bin_edges(values);
    if edges.len() < 2 {
        return Err(EdaError::NoValidValues(feature.to_string()));
    }
    let counts = histogram_counts(values, &edges);
    let bin_width = edges[1] - edges[0];
    debug!("{}: {} bins of width {:.4}", feature, counts.len(), bin_width);

    let kde = KdeCurve::estimate(values, 0.0, KDE_GRIDSIZE)
        .map(|curve| curve.scaled(values.len() as f64 * bin_width));

    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;
    let max_kde = kde.as_ref().map_or(0.0, KdeCurve::max_density);
    let y_max = max_count.max(max_kde).max(1.0) * 1.05;
    let (x_min, x_max) = padded_range(edges[0], edges[edges.len() - 1]);

    let root = BitMapBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Histogram of {}", feature), TITLE_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(feature)
        .y_desc("Count")
        .draw()?;

    let bars = edges.windows(2).zip(&counts).map(|(edge, &count)| {
        Rectangle::new([(edge[0], 0.0), (edge[1], count as f64)], PRIMARY.mix(0.6).filled())
    });
    chart.draw_series(bars)?;

    let outlines = edges.windows(2).zip(&counts).map(|(edge, &count)| {
        Rectangle::new([(edge[0], 0.0), (edge[1], count as f64)], PRIMARY.stroke_width(1))
    });
    chart.draw_series(outlines)?;

    if let Some(curve) = kde {
        chart.draw_series(LineSeries::new(curve.points(), PRIMARY.stroke_width(2)))?;
    }

    root.present()?;
    Ok(())
}
