#![allow(dead_code)]

pub mod projectors;

use ndarray::Array2;

/// Labels laid out in contiguous blocks: noise first, then clusters 0, 1, ...
pub fn block_labels(block_sizes: &[usize]) -> Vec<i32> {
    block_sizes
        .iter()
        .enumerate()
        .flat_map(|(block, &size)| std::iter::repeat_n(block as i32 - 1, size))
        .collect()
}

/// Embeddings whose first column is the row index, so projected
/// positions can be traced back to rows.
pub fn indexed_embeddings(rows: usize, dims: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, dims), |(row, col)| {
        if col == 0 {
            row as f32
        } else {
            ((row * 31 + col * 17) % 97) as f32 / 97.0
        }
    })
}

/// Three well separated blobs around distinct centres.
pub fn blob_embeddings(rows: usize, dims: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, dims), |(row, col)| {
        let centre = (row % 3) as f32 * 10.0;
        let jitter = ((row * 7 + col * 13) % 11) as f32 / 11.0;
        centre + jitter + col as f32 * 0.1 + row as f32 * 1e-3
    })
}
