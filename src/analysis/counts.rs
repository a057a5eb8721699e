//! Count vectors and summary stats derived from cluster labels.

use std::collections::HashMap;

use crate::error::PlotError;

/// Label reserved for points that belong to no cluster.
pub const NOISE_LABEL: i32 = -1;

/// Offset of `label` inside a count vector (noise lives at 0).
///
/// Returns `None` for labels below the noise sentinel.
pub fn count_offset(label: i32) -> Option<usize> {
    usize::try_from(i64::from(label) + 1).ok()
}

/// Build a count vector where the count for label `L` sits at `L + 1`.
///
/// Cluster ids are dense, so every id must be smaller than the number of
/// labels; the vector never grows past `labels.len() + 1` slots.
pub fn cluster_counts(labels: &[i32]) -> Result<Vec<usize>, PlotError> {
    let mut counts = vec![0usize; 1];
    for &label in labels {
        let offset = count_offset(label).ok_or(PlotError::MissingClusterCount {
            label,
            counts_len: counts.len(),
        })?;
        if offset > labels.len() {
            return Err(PlotError::ClusterIdOutOfRange {
                label,
                points: labels.len(),
            });
        }
        if offset >= counts.len() {
            counts.resize(offset + 1, 0);
        }
        counts[offset] += 1;
    }
    Ok(counts)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterStats {
    pub cluster_count: usize,
    pub noise_count: usize,
    pub noise_ratio: f32,
    pub min_cluster_size: usize,
    pub max_cluster_size: usize,
}

pub fn summarize_labels(labels: &[i32]) -> ClusterStats {
    let mut cluster_sizes: HashMap<i32, usize> = HashMap::new();
    let mut noise = 0usize;
    for &label in labels {
        if label < 0 {
            noise += 1;
        } else {
            *cluster_sizes.entry(label).or_insert(0) += 1;
        }
    }
    let total = labels.len().max(1) as f32;
    let min_cluster_size = cluster_sizes.values().copied().min().unwrap_or(0);
    let max_cluster_size = cluster_sizes.values().copied().max().unwrap_or(0);
    ClusterStats {
        cluster_count: cluster_sizes.len(),
        noise_count: noise,
        noise_ratio: noise as f32 / total,
        min_cluster_size,
        max_cluster_size,
    }
}
