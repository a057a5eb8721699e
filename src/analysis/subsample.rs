//! Row selection ahead of projection: stride subsampling and coreset alignment.

use std::collections::BTreeSet;

use crate::error::PlotError;

/// Number of points the strided subset aims for.
pub const DEFAULT_TARGET_POINTS: usize = 100;

/// Stride that keeps roughly `target_points` rows out of `rows`, never below 1.
pub fn stride_for(rows: usize, target_points: usize) -> usize {
    (rows / target_points.max(1)).max(1)
}

/// Every `stride`-th row index, starting at 0.
pub fn strided_indices(rows: usize, stride: usize) -> Vec<usize> {
    (0..rows).step_by(stride.max(1)).collect()
}

/// Rows retained for a joint before/after projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoresetAlignment {
    /// Sorted, duplicate-free row indices to project.
    pub retained: Vec<usize>,
    /// Positions within `retained` whose row belongs to the coreset.
    pub coreset_positions: Vec<usize>,
}

impl CoresetAlignment {
    /// Original row ids of the coreset points, in ascending order.
    pub fn coreset_rows(&self) -> Vec<usize> {
        self.coreset_positions
            .iter()
            .map(|&pos| self.retained[pos])
            .collect()
    }
}

/// Union the strided rows with the coreset so no coreset point is dropped.
pub fn align_coreset(
    rows: usize,
    stride: usize,
    coreset_ids: &[usize],
) -> Result<CoresetAlignment, PlotError> {
    let mut coreset = BTreeSet::new();
    for &index in coreset_ids {
        if index >= rows {
            return Err(PlotError::CoresetIndexOutOfRange { index, rows });
        }
        coreset.insert(index);
    }
    let mut kept: BTreeSet<usize> = strided_indices(rows, stride).into_iter().collect();
    kept.extend(coreset.iter().copied());
    let retained: Vec<usize> = kept.into_iter().collect();
    let coreset_positions = retained
        .iter()
        .enumerate()
        .filter(|(_, row)| coreset.contains(row))
        .map(|(pos, _)| pos)
        .collect();
    Ok(CoresetAlignment {
        retained,
        coreset_positions,
    })
}
