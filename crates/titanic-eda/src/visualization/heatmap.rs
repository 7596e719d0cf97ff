//! Annotated correlation heatmap.

use super::palette::{coolwarm, format_2g, normalize, text_color_on, OUTLINE};
use super::TITLE_FONT;
use crate::config::FigureSize;
use crate::error::{EdaError, Result};
use crate::types::CorrelationMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const HEATMAP_TITLE: &str = "Correlation Matrix of Numeric Features";

// pixel layout below the title
const LEFT_MARGIN: i32 = 150;
const TOP_MARGIN: i32 = 10;
const BOTTOM_MARGIN: i32 = 50;
const COLORBAR_SPACE: i32 = 150;
const COLORBAR_GAP: i32 = 40;
const COLORBAR_WIDTH: i32 = 30;
const COLORBAR_TICKS: usize = 5;

/// Draw `matrix` as a heatmap to `path`.
///
/// The colour scale spans the smallest to the largest defined entry.
/// Undefined entries stay blank and carry no annotation.
pub fn draw_heatmap(path: &Path, matrix: &CorrelationMatrix, size: FigureSize) -> Result<()> {
    if matrix.is_empty() {
        return Err(EdaError::NoValidValues("numeric columns".to_string()));
    }
    let (vmin, vmax) = matrix.range().unwrap_or((-1.0, 1.0));

    let root = BitMapBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(HEATMAP_TITLE, TITLE_FONT)?;
    let (width, height) = area.dim_in_pixel();

    let n = matrix.len() as i32;
    let cell = ((width as i32 - LEFT_MARGIN - COLORBAR_SPACE) / n)
        .min((height as i32 - TOP_MARGIN - BOTTOM_MARGIN) / n)
        .max(1);
    let (x0, y0) = (LEFT_MARGIN, TOP_MARGIN);
    let side = cell * n;

    let annotation_size = (cell / 6).clamp(10, 20);
    let label_font = ("sans-serif", 16).into_font();

    for (i, row) in matrix.values.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let left = x0 + j as i32 * cell;
            let top = y0 + i as i32 * cell;
            let corners = [(left, top), (left + cell, top + cell)];

            if value.is_finite() {
                let color = coolwarm(normalize(value, vmin, vmax));
                area.draw(&Rectangle::new(corners, color.filled()))?;

                let style = ("sans-serif", annotation_size)
                    .into_font()
                    .color(&text_color_on(color))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                area.draw(&Text::new(
                    format_2g(value),
                    (left + cell / 2, top + cell / 2),
                    style,
                ))?;
            }
            area.draw(&Rectangle::new(corners, WHITE.stroke_width(1)))?;
        }
    }

    let row_label = label_font.color(&BLACK).pos(Pos::new(HPos::Right, VPos::Center));
    let col_label = label_font.color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    for (idx, name) in matrix.columns.iter().enumerate() {
        let center = idx as i32 * cell + cell / 2;
        area.draw(&Text::new(name.as_str(), (x0 - 8, y0 + center), row_label.clone()))?;
        area.draw(&Text::new(name.as_str(), (x0 + center, y0 + side + 8), col_label.clone()))?;
    }

    // colour bar, warm end on top
    let bar_left = x0 + side + COLORBAR_GAP;
    for p in 0..side {
        let t = 1.0 - f64::from(p) / f64::from((side - 1).max(1));
        area.draw(&Rectangle::new(
            [(bar_left, y0 + p), (bar_left + COLORBAR_WIDTH, y0 + p + 1)],
            coolwarm(t).filled(),
        ))?;
    }

    let tick_label = label_font.color(&BLACK).pos(Pos::new(HPos::Left, VPos::Center));
    for k in 0..COLORBAR_TICKS {
        let frac = k as f64 / (COLORBAR_TICKS - 1) as f64;
        let value = vmin + (vmax - vmin) * frac;
        let y = y0 + ((1.0 - frac) * f64::from(side - 1)).round() as i32;
        let tick_right = bar_left + COLORBAR_WIDTH;
        area.draw(&PathElement::new(
            vec![(tick_right, y), (tick_right + 5, y)],
            OUTLINE.stroke_width(1),
        ))?;
        area.draw(&Text::new(format_2g(value), (tick_right + 9, y), tick_label.clone()))?;
    }

    root.present()?;
    Ok(())
}
