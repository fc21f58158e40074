use crate::field::VelocityField;
use crate::grid::Grid;
use crate::serialize::point_list;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct StagnationParams {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for StagnationParams {
    fn default() -> Self {
        StagnationParams {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Grid nodes, as `(row, col)`, where the speed fell below the search tolerance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StagnationSet {
    indices: BTreeSet<(usize, usize)>,
}

impl StagnationSet {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.indices.contains(&(row, col))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.indices.iter()
    }

    /// Coordinates of the stagnation nodes on the grid the field was evaluated on
    pub fn points(&self, grid: &Grid) -> Vec<Point2<f64>> {
        self.indices
            .iter()
            .map(|(i, j)| grid.point(*i, *j))
            .collect()
    }
}

/// Stagnation nodes located in space, ready to be serialized alongside the field.
#[derive(Clone, Debug, Serialize)]
pub struct StagnationPoints {
    pub indices: StagnationSet,

    #[serde(serialize_with = "point_list")]
    pub points: Vec<Point2<f64>>,
}

impl StagnationPoints {
    pub fn new(indices: StagnationSet, grid: &Grid) -> Self {
        let points = indices.points(grid);
        StagnationPoints { indices, points }
    }
}

/// Collects every node whose speed is strictly below `tolerance`. Non-finite nodes never
/// qualify. Whether the analytic stagnation points are resolved depends on how close a node
/// lands to them, so an empty result is not an error.
pub fn find_stagnation_points(field: &VelocityField, tolerance: f64) -> StagnationSet {
    let speed = field.speed();
    let (rows, cols) = speed.shape();
    let mut indices = BTreeSet::new();
    for i in 0..rows {
        for j in 0..cols {
            if speed[(i, j)] < tolerance {
                indices.insert((i, j));
            }
        }
    }

    log::debug!(
        "{} stagnation nodes below tolerance {:e}",
        indices.len(),
        tolerance
    );
    StagnationSet { indices }
}
