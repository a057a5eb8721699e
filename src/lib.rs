//! t-SNE scatter views of clustering and coreset sampling results.
/// Subsampling, label counts and projection backends.
pub mod analysis;
/// Plot configuration loaded from TOML.
pub mod config;
/// Error types shared across the crate.
pub mod error;
/// Tracing subscriber setup.
pub mod logging;
/// Figure model, scatter rendering and SVG export.
pub mod plot;
/// Single-view and before/after coreset figures.
pub mod views;

pub use analysis::projector::{
    DeviceMatrix, PcaProjector, Projection, ProjectionError, ProjectionParams, Projector,
    ProjectorKind, TsneProjector, projector_for,
};
pub use config::PlotConfig;
pub use error::PlotError;
pub use plot::Figure;
pub use views::{plot_coreset_results, plot_dbscan_results};
