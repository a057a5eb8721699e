//! SVG export of a `Figure` through `plotters`.

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::info;

use super::figure::{Figure, Panel};
use super::style;
use crate::error::PlotError;

const PANEL_MARGIN_PX: u32 = 10;
const RANGE_PADDING: f32 = 0.05;
const FONT_FAMILY: &str = "sans-serif";

impl Figure {
    /// Render the figure to an SVG document.
    pub fn to_svg(&self) -> Result<String, PlotError> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.pixel_size()).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;
            let areas = root.split_evenly(self.grid);
            for (panel, area) in self.panels.iter().zip(areas.iter()) {
                draw_panel(panel, area)?;
            }
            root.present().map_err(render_error)?;
        }
        Ok(buffer)
    }

    /// Render the figure and write it to `path`.
    pub fn save_svg(&self, path: &Path) -> Result<(), PlotError> {
        let svg = self.to_svg()?;
        std::fs::write(path, svg).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            panels = self.panels.len(),
            "Saved cluster figure"
        );
        Ok(())
    }
}

fn draw_panel<DB: DrawingBackend>(
    panel: &Panel,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), PlotError> {
    let (x_range, y_range) = padded_ranges(panel.bounds());
    let mut builder = ChartBuilder::on(area);
    builder.margin(PANEL_MARGIN_PX);
    if let Some(title) = &panel.title {
        builder.caption(&title.text, (FONT_FAMILY, style::font_px(title.font_size)));
    }
    if panel.axes_visible {
        builder.x_label_area_size(30).y_label_area_size(40);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;
    if panel.axes_visible {
        chart.configure_mesh().draw().map_err(render_error)?;
    }

    for layer in &panel.layers {
        let color = RGBColor(layer.color.r, layer.color.g, layer.color.b);
        let radius = style::marker_radius_px(layer.marker_size);
        let points = layer
            .points
            .iter()
            .filter(|point| point[0].is_finite() && point[1].is_finite())
            .map(|point| (point[0], point[1]));
        let series = if radius < style::MIN_CIRCLE_RADIUS_PX {
            chart.draw_series(points.map(|point| Pixel::new(point, color.filled())))
        } else {
            let radius = radius.round();
            chart.draw_series(points.map(|point| Circle::new(point, radius, color.filled())))
        }
        .map_err(render_error)?;
        if let (Some(legend), Some(label)) = (&panel.legend, &layer.legend_label) {
            // Legend glyphs use the legend size, not the data marker size.
            let glyph = style::legend_radius_px(legend.glyph_size);
            series
                .label(label.as_str())
                .legend(move |(x, y)| Circle::new((x, y), glyph, color.filled()));
        }
    }

    if let Some(legend) = &panel.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, style::font_px(legend.font_size)))
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error)?;
    }
    Ok(())
}

fn padded_ranges(bounds: Option<(f32, f32, f32, f32)>) -> (Range<f32>, Range<f32>) {
    let Some((x_min, x_max, y_min, y_max)) = bounds else {
        return (-1.0..1.0, -1.0..1.0);
    };
    (pad(x_min, x_max), pad(y_min, y_max))
}

fn pad(min: f32, max: f32) -> Range<f32> {
    let span = max - min;
    let margin = if span > f32::EPSILON {
        span * RANGE_PADDING
    } else {
        1.0
    };
    (min - margin)..(max + margin)
}

fn render_error<E>(err: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync,
{
    PlotError::Render(err.to_string())
}
