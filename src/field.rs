use crate::elementary::ElementaryFlow;
use crate::errors::{FlowError, FlowResult};
use crate::grid::Grid;
use crate::serialize::matrix_rows;
use ncollide2d::na::DMatrix;
use rayon::prelude::*;
use serde::Serialize;

/// Velocity components at every node of the grid the field was evaluated on.
#[derive(Clone, Debug, Serialize)]
pub struct VelocityField {
    #[serde(serialize_with = "matrix_rows")]
    u: DMatrix<f64>,

    #[serde(serialize_with = "matrix_rows")]
    v: DMatrix<f64>,
}

impl VelocityField {
    pub(crate) fn new(u: DMatrix<f64>, v: DMatrix<f64>) -> VelocityField {
        debug_assert_eq!(u.shape(), v.shape());
        VelocityField { u, v }
    }

    /// A field of zero velocity with the same shape as the grid.
    pub fn quiescent(grid: &Grid) -> VelocityField {
        let (rows, cols) = grid.shape();
        VelocityField::new(DMatrix::zeros(rows, cols), DMatrix::zeros(rows, cols))
    }

    pub fn u(&self) -> &DMatrix<f64> {
        &self.u
    }

    pub fn v(&self) -> &DMatrix<f64> {
        &self.v
    }

    pub fn shape(&self) -> (usize, usize) {
        self.u.shape()
    }

    pub fn velocity(&self, row: usize, col: usize) -> (f64, f64) {
        (self.u[(row, col)], self.v[(row, col)])
    }

    /// Velocity magnitude `sqrt(u² + v²)` at each node
    pub fn speed(&self) -> DMatrix<f64> {
        self.u.zip_map(&self.v, |u, v| (u * u + v * v).sqrt())
    }

    /// Pressure coefficient `1 - |V|² / v_inf²` at each node, relative to a freestream speed.
    pub fn pressure_coefficient(&self, v_inf: f64) -> DMatrix<f64> {
        let q = v_inf * v_inf;
        self.u.zip_map(&self.v, |u, v| 1.0 - (u * u + v * v) / q)
    }

    pub fn scaled(&self, k: f64) -> VelocityField {
        VelocityField::new(&self.u * k, &self.v * k)
    }

    /// Number of nodes where either component is NaN or infinite
    pub fn non_finite_count(&self) -> usize {
        self.u
            .iter()
            .zip(self.v.iter())
            .filter(|(u, v)| !(u.is_finite() && v.is_finite()))
            .count()
    }

    pub fn try_add(&self, other: &VelocityField) -> FlowResult<VelocityField> {
        if self.shape() != other.shape() {
            return Err(FlowError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            });
        }
        Ok(VelocityField::new(&self.u + &other.u, &self.v + &other.v))
    }
}

/// Sums any number of fields of equal shape, component by component.
pub fn superpose(fields: &[VelocityField]) -> FlowResult<VelocityField> {
    let (first, rest) = fields.split_first().ok_or(FlowError::EmptySuperposition)?;
    rest.iter().try_fold(first.clone(), |acc, f| acc.try_add(f))
}

/// Evaluates every element on the same grid in parallel and superposes the results. An empty
/// slice produces a quiescent field.
pub fn evaluate_all<E: ElementaryFlow + Sync>(
    elements: &[E],
    grid: &Grid,
) -> FlowResult<VelocityField> {
    log::debug!(
        "evaluating {} elements on a {:?} grid",
        elements.len(),
        grid.shape()
    );
    if elements.is_empty() {
        return Ok(VelocityField::quiescent(grid));
    }

    let fields: Vec<VelocityField> = elements
        .par_iter()
        .map(|e| e.compute_velocity_field(grid))
        .collect();
    superpose(&fields)
}
