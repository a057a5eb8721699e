//! Row selection, label bookkeeping and projection ahead of plotting.

pub mod counts;
pub mod projector;
pub mod subsample;
