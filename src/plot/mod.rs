//! Figure model, cluster scatter rendering and SVG export.

pub mod figure;
pub mod scatter;
pub mod style;
mod svg;

pub use figure::{Figure, Legend, LegendEntry, Panel, ScatterLayer, Title};
pub use scatter::{ScatterOptions, plot_tsne};
