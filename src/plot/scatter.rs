use std::collections::BTreeMap;

use ndarray::ArrayView2;
use tracing::debug;

use super::figure::{Legend, LegendEntry, Panel, ScatterLayer, Title};
use super::style;
use crate::analysis::counts::{NOISE_LABEL, count_offset};
use crate::error::PlotError;

/// Options for a single label-partitioned scatter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterOptions {
    /// Clusters with more points than this get large markers and a legend entry.
    pub min_size: usize,
    pub legend: bool,
    /// Empty means no title.
    pub title: String,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            min_size: 100,
            legend: true,
            title: String::new(),
        }
    }
}

/// Draw one scatter layer per distinct label into `panel`.
///
/// `coords` holds one `[x, y]` row per entry of `labels`. `counts` follows the
/// offset convention (count for label `L` at `L + 1`). Noise points are drawn
/// small and gray without a count lookup. The panel is left untouched when an
/// error is returned.
pub fn plot_tsne(
    panel: &mut Panel,
    coords: ArrayView2<'_, f32>,
    labels: &[i32],
    counts: &[usize],
    options: &ScatterOptions,
) -> Result<(), PlotError> {
    if coords.ncols() != 2 {
        return Err(PlotError::CoordinateShape(coords.ncols()));
    }
    if coords.nrows() != labels.len() {
        return Err(PlotError::LengthMismatch {
            what: "labels",
            expected: coords.nrows(),
            actual: labels.len(),
        });
    }

    let mut by_label: BTreeMap<i32, Vec<[f32; 2]>> = BTreeMap::new();
    for (row, &label) in coords.rows().into_iter().zip(labels) {
        by_label.entry(label).or_default().push([row[0], row[1]]);
    }

    let mut layers = Vec::with_capacity(by_label.len());
    for (label, points) in by_label {
        layers.push(build_layer(label, points, counts, options.min_size)?);
    }

    let entries: Vec<LegendEntry> = layers
        .iter()
        .filter_map(|layer| {
            layer.legend_label.as_ref().map(|label| LegendEntry {
                label: label.clone(),
                color: layer.color,
            })
        })
        .collect();
    debug!(
        layers = layers.len(),
        legend_entries = entries.len(),
        points = labels.len(),
        "Built cluster scatter layers"
    );

    panel.layers.extend(layers);
    if options.legend && !entries.is_empty() {
        panel.legend = Some(Legend {
            entries,
            glyph_size: style::LEGEND_GLYPH_AREA,
            font_size: style::LEGEND_FONT_SIZE,
        });
    }
    panel.axes_visible = false;
    if !options.title.is_empty() {
        panel.title = Some(Title {
            text: options.title.clone(),
            font_size: style::TITLE_FONT_SIZE,
        });
    }
    Ok(())
}

fn build_layer(
    label: i32,
    points: Vec<[f32; 2]>,
    counts: &[usize],
    min_size: usize,
) -> Result<ScatterLayer, PlotError> {
    if label == NOISE_LABEL {
        return Ok(ScatterLayer {
            label,
            points,
            marker_size: style::NOISE_MARKER_AREA,
            color: style::NOISE_COLOR,
            legend_label: None,
        });
    }
    let count = count_offset(label)
        .and_then(|offset| counts.get(offset))
        .copied()
        .ok_or(PlotError::MissingClusterCount {
            label,
            counts_len: counts.len(),
        })?;
    let (marker_size, legend_label) = if count > min_size {
        (style::LARGE_CLUSTER_MARKER_AREA, Some(format!("Cluster {label}")))
    } else {
        (style::SMALL_CLUSTER_MARKER_AREA, None)
    };
    Ok(ScatterLayer {
        label,
        points,
        marker_size,
        color: style::cluster_color(label),
        legend_label,
    })
}
