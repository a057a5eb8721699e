//! Explicit figure model: a grid of panels, each holding scatter layers.
//!
//! Renderers draw into a `Panel` they are handed; nothing is global. The
//! orchestration functions build a `Figure` and hand it back so the caller
//! decides when and where to export it.

use super::style::Rgb;
use crate::error::PlotError;

/// One scatter call: all points sharing a label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    pub label: i32,
    pub points: Vec<[f32; 2]>,
    /// Marker area in points².
    pub marker_size: f32,
    pub color: Rgb,
    pub legend_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    /// Glyph area in points², applied to every entry.
    pub glyph_size: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub layers: Vec<ScatterLayer>,
    pub legend: Option<Legend>,
    pub title: Option<Title>,
    pub axes_visible: bool,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            legend: None,
            title: None,
            axes_visible: true,
        }
    }
}

impl Panel {
    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.points.len()).sum()
    }

    pub fn layer(&self, label: i32) -> Option<&ScatterLayer> {
        self.layers.iter().find(|layer| layer.label == label)
    }

    /// Data bounds as `(x_min, x_max, y_min, y_max)`, ignoring non-finite points.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let mut bounds: Option<(f32, f32, f32, f32)> = None;
        for [x, y] in self.layers.iter().flat_map(|layer| layer.points.iter().copied()) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x_min, x_max, y_min, y_max)) => {
                    (x_min.min(x), x_max.max(x), y_min.min(y), y_max.max(y))
                }
            });
        }
        bounds
    }
}

/// A figure of `rows x cols` panels, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width and height in inches.
    pub size: (f32, f32),
    pub grid: (usize, usize),
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Figure with a single panel.
    pub fn new(size: (f32, f32)) -> Self {
        Self::subplots(size, 1, 1)
    }

    pub fn subplots(size: (f32, f32), rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            size,
            grid: (rows, cols),
            panels: vec![Panel::default(); rows * cols],
        }
    }

    pub fn panel(&self, index: usize) -> Result<&Panel, PlotError> {
        let panels = self.panels.len();
        self.panels
            .get(index)
            .ok_or(PlotError::PanelOutOfRange { index, panels })
    }

    pub fn panel_mut(&mut self, index: usize) -> Result<&mut Panel, PlotError> {
        let panels = self.panels.len();
        self.panels
            .get_mut(index)
            .ok_or(PlotError::PanelOutOfRange { index, panels })
    }

    /// Pixel dimensions used when exporting.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f32| (inches.max(0.0) * super::style::PIXELS_PER_INCH).round() as u32;
        (px(self.size.0).max(1), px(self.size.1).max(1))
    }
}
