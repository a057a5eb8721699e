use std::path::PathBuf;

use thiserror::Error;

use crate::analysis::projector::ProjectionError;

/// Errors raised while preparing, rendering or exporting a cluster plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// No rows were supplied.
    #[error("No embeddings to plot")]
    EmptyInput,
    /// Two per-point inputs disagree on the number of points.
    #[error("Length mismatch: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Which input was inconsistent.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
    /// Coordinates handed to the renderer are not two-dimensional.
    #[error("Expected 2 coordinate columns, got {0}")]
    CoordinateShape(usize),
    /// A coreset id does not refer to a row of the embedding matrix.
    #[error("Coreset index {index} out of range for {rows} rows")]
    CoresetIndexOutOfRange {
        /// Offending coreset id.
        index: usize,
        /// Number of embedding rows.
        rows: usize,
    },
    /// The count vector has no slot for a label.
    #[error("No cluster count for label {label} (count vector has {counts_len} entries)")]
    MissingClusterCount {
        /// Label whose count was requested.
        label: i32,
        /// Length of the supplied count vector.
        counts_len: usize,
    },
    /// A cluster id is not smaller than the number of labelled points.
    #[error("Cluster id {label} out of range for {points} labelled points")]
    ClusterIdOutOfRange {
        /// Offending cluster id.
        label: i32,
        /// Number of labels supplied.
        points: usize,
    },
    /// A panel index outside the figure grid was requested.
    #[error("Panel {index} out of range for a figure with {panels} panels")]
    PanelOutOfRange {
        /// Requested panel index.
        index: usize,
        /// Number of panels in the figure.
        panels: usize,
    },
    /// The projection backend failed.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// The drawing backend failed.
    #[error("Render failed: {0}")]
    Render(String),
    /// Writing an exported figure failed.
    #[error("Failed to write figure to {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
