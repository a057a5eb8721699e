//! Plot configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::analysis::projector::{ProjectionParams, ProjectorKind};
use crate::analysis::subsample::DEFAULT_TARGET_POINTS;
use crate::plot::ScatterOptions;

/// Errors that may occur while loading plot configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlotConfig {
    /// Clusters larger than this are highlighted and listed in the legend.
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Approximate number of strided points kept for projection.
    #[serde(default = "default_target_points")]
    pub target_points: usize,
    #[serde(default)]
    pub projector: ProjectorKind,
    #[serde(default)]
    pub projection_params: ProjectionParams,
    /// Width and height in inches of the single-panel view.
    #[serde(default = "default_single_figure_size")]
    pub single_figure_size: (f32, f32),
    /// Width and height in inches of the before/after comparison.
    #[serde(default = "default_comparison_figure_size")]
    pub comparison_figure_size: (f32, f32),
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            target_points: default_target_points(),
            projector: ProjectorKind::default(),
            projection_params: ProjectionParams::new(),
            single_figure_size: default_single_figure_size(),
            comparison_figure_size: default_comparison_figure_size(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: PlotConfig = toml::from_str(text)?;
        config.target_points = clamp_target_points(config.target_points);
        Ok(config)
    }

    /// Scatter options for one panel of this configuration.
    pub fn scatter_options(&self, legend: bool, title: &str) -> ScatterOptions {
        ScatterOptions {
            min_size: self.min_size,
            legend,
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Directory for per-launch log files; stdout only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            log_dir: None,
            max_log_files: default_max_log_files(),
        }
    }
}

fn clamp_target_points(value: usize) -> usize {
    value.max(1)
}

fn default_min_size() -> usize {
    100
}

fn default_target_points() -> usize {
    DEFAULT_TARGET_POINTS
}

fn default_single_figure_size() -> (f32, f32) {
    (20.0, 20.0)
}

fn default_comparison_figure_size() -> (f32, f32) {
    (20.0, 10.0)
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PlotConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.min_size, 100);
        assert_eq!(config.target_points, 100);
        assert_eq!(config.projector, ProjectorKind::Tsne);
        assert_eq!(config.single_figure_size, (20.0, 20.0));
        assert_eq!(config.comparison_figure_size, (20.0, 10.0));
    }

    #[test]
    fn parses_projector_and_params() {
        let config = PlotConfig::from_toml_str(
            r#"
            min_size = 25
            projector = "pca"
            comparison_figure_size = [12.0, 6.0]

            [projection_params]
            perplexity = 30.0
            random_state = 0

            [logging]
            filter = "clusterview=debug"
            max_log_files = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.min_size, 25);
        assert_eq!(config.projector, ProjectorKind::Pca);
        assert_eq!(config.comparison_figure_size, (12.0, 6.0));
        assert_eq!(config.projection_params.get("perplexity"), Some(&30.0));
        assert_eq!(config.projection_params.get("random_state"), Some(&0.0));
        assert_eq!(config.logging.filter, "clusterview=debug");
        assert_eq!(config.logging.max_log_files, 3);
        assert_eq!(config.logging.log_dir, None);
    }

    #[test]
    fn zero_target_points_is_clamped() {
        let config = PlotConfig::from_toml_str("target_points = 0").unwrap();
        assert_eq!(config.target_points, 1);
    }

    #[test]
    fn load_reports_path_on_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            PlotConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "min_size = \"lots\"").unwrap();
        assert!(matches!(
            PlotConfig::load(&broken),
            Err(ConfigError::ParseToml { .. })
        ));
    }
}
