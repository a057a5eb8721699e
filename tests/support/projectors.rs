use std::cell::Cell;

use clusterview::{DeviceMatrix, Projection, ProjectionError, ProjectionParams, Projector};
use ndarray::{Array2, ArrayView2, s};

/// Deterministic layout: the first two input columns, counting calls.
#[derive(Default)]
pub struct LeadingColumnsProjector {
    calls: Cell<usize>,
    last_rows: Cell<usize>,
}

impl LeadingColumnsProjector {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_rows(&self) -> usize {
        self.last_rows.get()
    }
}

impl Projector for LeadingColumnsProjector {
    fn name(&self) -> &'static str {
        "leading-columns"
    }

    fn fit_2d(
        &self,
        points: ArrayView2<'_, f32>,
        _params: &ProjectionParams,
    ) -> Result<Projection, ProjectionError> {
        self.calls.set(self.calls.get() + 1);
        self.last_rows.set(points.nrows());
        Ok(Projection::Host(points.slice(s![.., 0..2]).to_owned()))
    }
}

#[derive(Debug)]
pub struct PinnedBuffer(pub Array2<f32>);

impl DeviceMatrix for PinnedBuffer {
    fn to_host(&self) -> Result<Array2<f32>, ProjectionError> {
        Ok(self.0.clone())
    }
}

/// Same layout as `LeadingColumnsProjector`, returned as a device buffer.
pub struct DeviceProjector;

impl Projector for DeviceProjector {
    fn name(&self) -> &'static str {
        "device"
    }

    fn fit_2d(
        &self,
        points: ArrayView2<'_, f32>,
        _params: &ProjectionParams,
    ) -> Result<Projection, ProjectionError> {
        Ok(Projection::Device(Box::new(PinnedBuffer(
            points.slice(s![.., 0..2]).to_owned(),
        ))))
    }
}

/// Always fails, standing in for a non-converging backend.
pub struct FailingProjector;

impl Projector for FailingProjector {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn fit_2d(
        &self,
        _points: ArrayView2<'_, f32>,
        _params: &ProjectionParams,
    ) -> Result<Projection, ProjectionError> {
        Err(ProjectionError::DeviceTransfer("device lost".to_string()))
    }
}
