//! Ready-made figures for clustering and coreset results.
//!
//! Both views subsample the embeddings, project them once, and return a
//! `Figure` that the caller exports with [`Figure::to_svg`] or
//! [`Figure::save_svg`].

use ndarray::{Array2, ArrayView2, Axis};
use tracing::{debug, info};

use crate::analysis::counts::summarize_labels;
use crate::analysis::projector::{Projector, project};
use crate::analysis::subsample::{align_coreset, stride_for, strided_indices};
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::plot::{Figure, plot_tsne};

pub const BEFORE_CORESET_TITLE: &str = "Before Coreset";
pub const AFTER_CORESET_TITLE: &str = "After Coreset";

/// Project a strided subset of `embeds` and draw it coloured by cluster.
pub fn plot_dbscan_results(
    projector: &dyn Projector,
    embeds: ArrayView2<'_, f32>,
    labels: &[i32],
    counts: &[usize],
    config: &PlotConfig,
) -> Result<Figure, PlotError> {
    validate_inputs(embeds, labels)?;
    let stride = stride_for(embeds.nrows(), config.target_points);
    let kept = strided_indices(embeds.nrows(), stride);
    debug!(
        rows = embeds.nrows(),
        stride,
        kept = kept.len(),
        "Subsampled embeddings"
    );
    log_label_summary(labels);

    let coords = project(
        projector,
        embeds.select(Axis(0), &kept).view(),
        &config.projection_params,
    )?;
    let kept_labels = select_labels(labels, &kept);

    let mut figure = Figure::new(config.single_figure_size);
    plot_tsne(
        figure.panel_mut(0)?,
        coords.view(),
        &kept_labels,
        counts,
        &config.scatter_options(true, ""),
    )?;
    Ok(figure)
}

/// Draw the strided points next to the coreset points in one shared layout.
///
/// Coreset rows are always projected, even when the stride would skip them.
/// The left panel shows every projected point; the right panel only the
/// coreset ones.
pub fn plot_coreset_results(
    projector: &dyn Projector,
    embeds: ArrayView2<'_, f32>,
    labels: &[i32],
    counts: &[usize],
    coreset_ids: &[usize],
    config: &PlotConfig,
) -> Result<Figure, PlotError> {
    validate_inputs(embeds, labels)?;
    let stride = stride_for(embeds.nrows(), config.target_points);
    let alignment = align_coreset(embeds.nrows(), stride, coreset_ids)?;
    debug!(
        rows = embeds.nrows(),
        stride,
        retained = alignment.retained.len(),
        coreset = alignment.coreset_positions.len(),
        "Aligned coreset with strided subset"
    );
    log_label_summary(labels);

    let coords = project(
        projector,
        embeds.select(Axis(0), &alignment.retained).view(),
        &config.projection_params,
    )?;
    let retained_labels = select_labels(labels, &alignment.retained);

    let coreset_coords: Array2<f32> = coords.select(Axis(0), &alignment.coreset_positions);
    let coreset_labels = select_labels(&retained_labels, &alignment.coreset_positions);

    let mut figure = Figure::subplots(config.comparison_figure_size, 1, 2);
    plot_tsne(
        figure.panel_mut(0)?,
        coords.view(),
        &retained_labels,
        counts,
        &config.scatter_options(false, BEFORE_CORESET_TITLE),
    )?;
    plot_tsne(
        figure.panel_mut(1)?,
        coreset_coords.view(),
        &coreset_labels,
        counts,
        &config.scatter_options(false, AFTER_CORESET_TITLE),
    )?;
    Ok(figure)
}

fn validate_inputs(embeds: ArrayView2<'_, f32>, labels: &[i32]) -> Result<(), PlotError> {
    if embeds.nrows() == 0 {
        return Err(PlotError::EmptyInput);
    }
    if labels.len() != embeds.nrows() {
        return Err(PlotError::LengthMismatch {
            what: "labels",
            expected: embeds.nrows(),
            actual: labels.len(),
        });
    }
    Ok(())
}

fn select_labels(labels: &[i32], indices: &[usize]) -> Vec<i32> {
    indices.iter().map(|&idx| labels[idx]).collect()
}

fn log_label_summary(labels: &[i32]) {
    let stats = summarize_labels(labels);
    info!(
        "Plotting {} points: {} clusters (noise: {} / {:.2}%, size min/max: {}/{})",
        labels.len(),
        stats.cluster_count,
        stats.noise_count,
        stats.noise_ratio * 100.0,
        stats.min_cluster_size,
        stats.max_cluster_size
    );
}
