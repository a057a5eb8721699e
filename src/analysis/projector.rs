//! 2-D projection backends behind a single `Projector` trait.
//!
//! Backends return a `Projection`, which is either already host-resident or
//! wraps a device buffer that must be copied back before plotting. Callers
//! go through [`project`] so both shapes end up as a plain `Array2<f32>`.

use std::collections::BTreeMap;
use std::fmt;

use linfa::traits::{Fit, Transformer};
use linfa::{DatasetBase, ParamGuard};
use linfa_reduction::{Pca, ReductionError};
use linfa_tsne::{TSneError, TSneParams};
use ndarray::{Array2, ArrayView2};
use rand_08::SeedableRng;
use rand_08::rngs::StdRng;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Named numeric parameters forwarded to a projection backend.
pub type ProjectionParams = BTreeMap<String, f64>;

const EMBEDDING_SIZE: usize = 2;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("t-SNE failed: {0}")]
    Tsne(#[from] TSneError),
    #[error("PCA failed: {0}")]
    Pca(#[from] ReductionError),
    #[error("{backend} does not accept parameter `{name}`")]
    UnknownParameter { backend: &'static str, name: String },
    #[error("Invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: String, value: f64 },
    #[error("Projection returned {rows}x{cols}, expected {expected_rows}x2")]
    Shape {
        expected_rows: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Device transfer failed: {0}")]
    DeviceTransfer(String),
}

/// Projection output still owned by an accelerator.
pub trait DeviceMatrix: fmt::Debug {
    /// Copy the coordinates into host memory.
    fn to_host(&self) -> Result<Array2<f32>, ProjectionError>;
}

#[derive(Debug)]
pub enum Projection {
    Host(Array2<f32>),
    Device(Box<dyn DeviceMatrix>),
}

impl Projection {
    /// Resolve to host memory; host results are returned untouched.
    pub fn into_host(self) -> Result<Array2<f32>, ProjectionError> {
        match self {
            Projection::Host(coords) => Ok(coords),
            Projection::Device(buffer) => {
                debug!("Copying device-resident projection to host");
                buffer.to_host()
            }
        }
    }
}

pub trait Projector {
    /// Short backend name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fit a 2-D layout with one output row per input row, in input order.
    fn fit_2d(
        &self,
        points: ArrayView2<'_, f32>,
        params: &ProjectionParams,
    ) -> Result<Projection, ProjectionError>;
}

/// Built-in backends selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectorKind {
    #[default]
    Tsne,
    Pca,
}

impl ProjectorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectorKind::Tsne => "tsne",
            ProjectorKind::Pca => "pca",
        }
    }
}

pub fn projector_for(kind: ProjectorKind) -> Box<dyn Projector> {
    match kind {
        ProjectorKind::Tsne => Box::new(TsneProjector),
        ProjectorKind::Pca => Box::new(PcaProjector),
    }
}

/// Run `projector` and return host coordinates shaped `(points.nrows(), 2)`.
pub fn project(
    projector: &dyn Projector,
    points: ArrayView2<'_, f32>,
    params: &ProjectionParams,
) -> Result<Array2<f32>, ProjectionError> {
    info!(
        backend = projector.name(),
        rows = points.nrows(),
        dims = points.ncols(),
        "Projecting embeddings to 2-D"
    );
    let coords = projector.fit_2d(points, params)?.into_host()?;
    if coords.nrows() != points.nrows() || coords.ncols() != EMBEDDING_SIZE {
        return Err(ProjectionError::Shape {
            expected_rows: points.nrows(),
            rows: coords.nrows(),
            cols: coords.ncols(),
        });
    }
    Ok(coords)
}

/// Barnes-Hut t-SNE on the CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsneProjector;

#[derive(Debug, Default, PartialEq)]
struct TsneSettings {
    perplexity: Option<f32>,
    approx_threshold: Option<f32>,
    max_iter: Option<usize>,
    seed: Option<u64>,
}

impl TsneSettings {
    fn from_params(params: &ProjectionParams) -> Result<Self, ProjectionError> {
        let mut settings = TsneSettings::default();
        for (name, &value) in params {
            match name.as_str() {
                "perplexity" => settings.perplexity = Some(positive(name, value)? as f32),
                "approx_threshold" | "angle" => {
                    settings.approx_threshold = Some(non_negative(name, value)? as f32)
                }
                "max_iter" | "n_iter" => {
                    settings.max_iter = Some(whole_number(name, value)? as usize)
                }
                "random_state" | "seed" => settings.seed = Some(whole_number(name, value)?),
                _ => {
                    return Err(ProjectionError::UnknownParameter {
                        backend: "tsne",
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(settings)
    }

    fn build(&self) -> TSneParams<f32, StdRng> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut params = TSneParams::embedding_size_with_rng(EMBEDDING_SIZE, rng);
        if let Some(perplexity) = self.perplexity {
            params = params.perplexity(perplexity);
        }
        if let Some(threshold) = self.approx_threshold {
            params = params.approx_threshold(threshold);
        }
        if let Some(max_iter) = self.max_iter {
            params = params.max_iter(max_iter);
        }
        params
    }
}

impl Projector for TsneProjector {
    fn name(&self) -> &'static str {
        "tsne"
    }

    fn fit_2d(
        &self,
        points: ArrayView2<'_, f32>,
        params: &ProjectionParams,
    ) -> Result<Projection, ProjectionError> {
        let settings = TsneSettings::from_params(params)?;
        debug!(?settings, "Running t-SNE");
        let tsne = settings.build().check()?;
        let coords = tsne.transform(points.to_owned())?;
        Ok(Projection::Host(coords))
    }
}

/// Linear PCA layout; fast and deterministic, useful as a preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcaProjector;

impl Projector for PcaProjector {
    fn name(&self) -> &'static str {
        "pca"
    }

    fn fit_2d(
        &self,
        points: ArrayView2<'_, f32>,
        params: &ProjectionParams,
    ) -> Result<Projection, ProjectionError> {
        if let Some(name) = params.keys().next() {
            return Err(ProjectionError::UnknownParameter {
                backend: "pca",
                name: name.clone(),
            });
        }
        // linfa-reduction only fits f64 records.
        let dataset = DatasetBase::from(points.mapv(f64::from));
        let pca = Pca::params(EMBEDDING_SIZE).fit(&dataset)?;
        let reduced = pca.transform(dataset);
        Ok(Projection::Host(reduced.records.mapv(|value| value as f32)))
    }
}

fn positive(name: &str, value: f64) -> Result<f64, ProjectionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, value))
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64, ProjectionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, value))
    }
}

fn whole_number(name: &str, value: f64) -> Result<u64, ProjectionError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(invalid(name, value))
    }
}

fn invalid(name: &str, value: f64) -> ProjectionError {
    ProjectionError::InvalidParameter {
        name: name.to_string(),
        value,
    }
}
