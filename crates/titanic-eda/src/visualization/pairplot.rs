//! Pairwise relationship grid coloured by a categorical column.

use super::palette::{format_level, hue_color};
use super::{padded_range, TITLE_FONT};
use crate::config::FigureSize;
use crate::error::{EdaError, Result};
use crate::profiler::statistics::{min_max, KdeCurve};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

pub const PAIRPLOT_TITLE: &str = "Pairplot of Key Features by Survival";

/// Bandwidths the diagonal density curves extend past the data.
const KDE_CUT: f64 = 3.0;
const KDE_GRIDSIZE: usize = 200;
const LEGEND_WIDTH: u32 = 120;
const TITLE_SPACE: u32 = 50;

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// One grid variable: its name and one value per row.
pub struct PairVariable {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// The hue column: its name and one level per row.
pub struct HueColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl HueColumn {
    /// Distinct present levels in ascending order.
    pub fn levels(&self) -> Vec<f64> {
        let mut levels: Vec<f64> = self.values.iter().flatten().copied().collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        levels
    }
}

/// Draw the grid of `variables` to `path`.
///
/// Off-diagonal panels scatter row variable against column variable, the
/// diagonal shows one density curve per hue level. Curves are weighted by
/// the level's share of rows so their areas sum to one. Rows without a
/// hue level are left out.
pub fn draw_pairplot(
    path: &Path,
    variables: &[PairVariable],
    hue: &HueColumn,
    panel: FigureSize,
) -> Result<()> {
    if variables.is_empty() {
        return Err(EdaError::NoValidValues("pairplot variables".to_string()));
    }
    let levels = hue.levels();
    if levels.is_empty() {
        return Err(EdaError::NoValidValues(hue.name.clone()));
    }

    let n = variables.len();
    let grid_width = panel.width * n as u32;
    let size = (grid_width + LEGEND_WIDTH, panel.height * n as u32 + TITLE_SPACE);
    debug!("Pairplot grid {}x{} with {} hue levels", n, n, levels.len());

    let ranges: Vec<(f64, f64)> = variables
        .iter()
        .map(|var| {
            let present: Vec<f64> = var.values.iter().flatten().copied().collect();
            min_max(&present).map_or((0.0, 1.0), |(lo, hi)| padded_range(lo, hi))
        })
        .collect();

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(PAIRPLOT_TITLE, TITLE_FONT)?;
    let (grid, legend) = area.split_horizontally(grid_width);

    for (idx, cell) in grid.split_evenly((n, n)).iter().enumerate() {
        let (row, col) = (idx / n, idx % n);
        let frame = PanelFrame {
            bottom: row == n - 1,
            left: col == 0,
            x_name: &variables[col].name,
            y_name: &variables[row].name,
            x_range: ranges[col],
        };
        if row == col {
            draw_diagonal(cell, &frame, &variables[col], hue, &levels)?;
        } else {
            draw_scatter(cell, &frame, &variables[col], &variables[row], ranges[row], hue, &levels)?;
        }
    }

    draw_legend(&legend, hue, &levels)?;

    root.present()?;
    Ok(())
}

/// Axis placement of one panel.
struct PanelFrame<'a> {
    bottom: bool,
    left: bool,
    x_name: &'a str,
    y_name: &'a str,
    x_range: (f64, f64),
}

fn build_chart<'a, 'b>(
    cell: &'a Panel<'b>,
    frame: &PanelFrame<'_>,
    y_range: (f64, f64),
) -> Result<ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>> {
    let mut chart = ChartBuilder::on(cell)
        .margin(6)
        .x_label_area_size(if frame.bottom { 40 } else { 0 })
        .y_label_area_size(if frame.left { 50 } else { 0 })
        .build_cartesian_2d(frame.x_range.0..frame.x_range.1, y_range.0..y_range.1)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(3)
            .y_labels(3)
            .label_style(("sans-serif", 11));
        if frame.bottom {
            mesh.x_desc(frame.x_name);
        }
        if frame.left {
            mesh.y_desc(frame.y_name);
        }
        mesh.draw()?;
    }

    Ok(chart)
}

fn draw_scatter(
    cell: &Panel<'_>,
    frame: &PanelFrame<'_>,
    x: &PairVariable,
    y: &PairVariable,
    y_range: (f64, f64),
    hue: &HueColumn,
    levels: &[f64],
) -> Result<()> {
    let mut chart = build_chart(cell, frame, y_range)?;

    for (level_idx, level) in levels.iter().enumerate() {
        let color = hue_color(level_idx).mix(0.7);
        let points = x
            .values
            .iter()
            .zip(&y.values)
            .zip(&hue.values)
            .filter(|(_, h)| **h == Some(*level))
            .filter_map(|((x, y), _)| Some(((*x)?, (*y)?)));
        chart.draw_series(points.map(|point| Circle::new(point, 2, color.filled())))?;
    }
    Ok(())
}

fn draw_diagonal(
    cell: &Panel<'_>,
    frame: &PanelFrame<'_>,
    var: &PairVariable,
    hue: &HueColumn,
    levels: &[f64],
) -> Result<()> {
    let total = hue.values.iter().flatten().count() as f64;

    let curves: Vec<(usize, KdeCurve)> = levels
        .iter()
        .enumerate()
        .filter_map(|(level_idx, level)| {
            let values: Vec<f64> = var
                .values
                .iter()
                .zip(&hue.values)
                .filter(|(_, h)| **h == Some(*level))
                .filter_map(|(v, _)| *v)
                .collect();
            let share = values.len() as f64 / total;
            let curve = KdeCurve::estimate(&values, KDE_CUT, KDE_GRIDSIZE);
            if curve.is_none() {
                debug!("{}: no density for level {}", var.name, format_level(*level));
            }
            curve.map(|c| (level_idx, c.scaled(share)))
        })
        .collect();

    let (x_lo, x_hi) = frame.x_range;
    let visible = |curve: &KdeCurve| -> Vec<(f64, f64)> {
        curve.points().filter(|(x, _)| *x >= x_lo && *x <= x_hi).collect()
    };

    let y_max = curves
        .iter()
        .map(|(_, c)| c.max_density())
        .fold(0.0, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = build_chart(cell, frame, (0.0, y_max))?;

    for (level_idx, curve) in &curves {
        let color = hue_color(*level_idx);
        let points = visible(curve);
        if points.len() < 2 {
            continue;
        }

        let mut outline = points.clone();
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            outline.push((last.0, 0.0));
            outline.push((first.0, 0.0));
        }
        chart.draw_series(std::iter::once(Polygon::new(outline, color.mix(0.25).filled())))?;
        chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;
    }
    Ok(())
}

fn draw_legend(area: &Panel<'_>, hue: &HueColumn, levels: &[f64]) -> Result<()> {
    let (_, height) = area.dim_in_pixel();
    let line_height = 22;
    let top = height as i32 / 2 - line_height * (levels.len() as i32 + 1) / 2;
    let font = ("sans-serif", 15).into_font();
    let text_style = font.color(&BLACK).pos(Pos::new(HPos::Left, VPos::Center));

    area.draw(&Text::new(hue.name.as_str(), (10, top), text_style.clone()))?;
    for (idx, level) in levels.iter().enumerate() {
        let y = top + line_height * (idx as i32 + 1);
        area.draw(&Circle::new((18, y), 6, hue_color(idx).filled()))?;
        area.draw(&Text::new(format_level(*level), (32, y), text_style.clone()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_levels_sorted_and_distinct() {
        let hue = HueColumn {
            name: "Survived".to_string(),
            values: vec![Some(1.0), Some(0.0), None, Some(1.0), Some(0.0)],
        };
        assert_eq!(hue.levels(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_pairplot_requires_hue_levels() {
        let dir = tempfile::tempdir().unwrap();
        let variables = vec![PairVariable {
            name: "Age".to_string(),
            values: vec![Some(1.0), Some(2.0)],
        }];
        let hue = HueColumn {
            name: "Survived".to_string(),
            values: vec![None, None],
        };

        let err = draw_pairplot(
            &dir.path().join("pairplot.png"),
            &variables,
            &hue,
            FigureSize::new(100, 100),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "NO_VALID_VALUES");
    }
}
