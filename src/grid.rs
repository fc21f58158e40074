use crate::algorithms::{linspace, preceding_index_search};
use crate::errors::{FlowError, FlowResult};
use crate::serialize::matrix_rows;
use itertools::iproduct;
use ncollide2d::na::{DMatrix, Point2};
use serde::{Deserialize, Serialize};

/// Parameters of a rectangular evaluation mesh. Origins are the lower-left corner of the grid;
/// when left unset the grid is centered on zero along that axis.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GridParams {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x_origin: Option<f64>,
    #[serde(default)]
    pub y_origin: Option<f64>,
    #[serde(default)]
    pub resolution: Option<usize>,
}

impl GridParams {
    pub fn new(width: f64, height: f64) -> Self {
        GridParams {
            width,
            height,
            x_origin: None,
            y_origin: None,
            resolution: None,
        }
    }

    pub fn with_origin(mut self, x_origin: f64, y_origin: f64) -> Self {
        self.x_origin = Some(x_origin);
        self.y_origin = Some(y_origin);
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn build(&self) -> FlowResult<Grid> {
        build_grid(
            self.width,
            self.height,
            self.x_origin,
            self.y_origin,
            self.resolution,
        )
    }
}

/// Node coordinates of a rectangular mesh. Row `i` holds the `i`-th y sample and column `j` the
/// `j`-th x sample, so `x[(i, j)] == x_samples[j]` and `y[(i, j)] == y_samples[i]`.
#[derive(Clone, Debug, Serialize)]
pub struct Grid {
    #[serde(serialize_with = "matrix_rows")]
    x: DMatrix<f64>,

    #[serde(serialize_with = "matrix_rows")]
    y: DMatrix<f64>,

    #[serde(skip)]
    x_samples: Vec<f64>,

    #[serde(skip)]
    y_samples: Vec<f64>,
}

impl Grid {
    fn from_samples(x_samples: Vec<f64>, y_samples: Vec<f64>) -> Grid {
        let (rows, cols) = (y_samples.len(), x_samples.len());
        let x = DMatrix::from_fn(rows, cols, |_, j| x_samples[j]);
        let y = DMatrix::from_fn(rows, cols, |i, _| y_samples[i]);
        Grid {
            x,
            y,
            x_samples,
            y_samples,
        }
    }

    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    pub fn y(&self) -> &DMatrix<f64> {
        &self.y
    }

    pub fn x_samples(&self) -> &[f64] {
        &self.x_samples
    }

    pub fn y_samples(&self) -> &[f64] {
        &self.y_samples
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    pub fn point(&self, row: usize, col: usize) -> Point2<f64> {
        Point2::new(self.x_samples[col], self.y_samples[row])
    }

    /// Iterates over every node as `((row, col), point)`, row by row.
    pub fn nodes(&self) -> impl Iterator<Item = ((usize, usize), Point2<f64>)> + '_ {
        iproduct!(0..self.y_samples.len(), 0..self.x_samples.len())
            .map(move |(i, j)| ((i, j), self.point(i, j)))
    }

    /// Finds the cell containing a point, returned as the `(row, col)` of its lower-left node.
    /// Points outside the grid clamp to the border cells.
    pub fn locate(&self, p: &Point2<f64>) -> (usize, usize) {
        (
            preceding_index_search(self.y_samples.as_slice(), p.y),
            preceding_index_search(self.x_samples.as_slice(), p.x),
        )
    }

    /// Spacing between neighbouring nodes along x and y. Zero on an axis with a single sample.
    pub fn spacing(&self) -> (f64, f64) {
        let step = |s: &[f64]| {
            if s.len() < 2 {
                0.0
            } else {
                (s[s.len() - 1] - s[0]) / (s.len() - 1) as f64
            }
        };
        (step(&self.x_samples), step(&self.y_samples))
    }
}

/// Largest resolution `build_grid` derives from the extent on its own. Anything finer has to be
/// asked for explicitly.
pub const MAX_DEFAULT_RESOLUTION: usize = 1 << 14;

/// Builds the evaluation mesh for a `width` by `height` rectangle.
///
/// # Arguments
///
/// * `x_origin`, `y_origin` - coordinates of the lower-left corner. Each one defaults to centering
/// the grid on zero along its axis.
///
/// * `resolution` - number of samples along both axes. Defaults to `max(width, height)` rounded
/// to the nearest integer, with a floor of one sample. An extent that would default to more than
/// [`MAX_DEFAULT_RESOLUTION`] samples is rejected with [`FlowError::ResolutionTooLarge`].
pub fn build_grid(
    width: f64,
    height: f64,
    x_origin: Option<f64>,
    y_origin: Option<f64>,
    resolution: Option<usize>,
) -> FlowResult<Grid> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(FlowError::InvalidDimensions { width, height });
    }

    let n = match resolution {
        Some(n) => n,
        None => {
            let extent = width.max(height).round();
            if extent > MAX_DEFAULT_RESOLUTION as f64 {
                return Err(FlowError::ResolutionTooLarge { extent });
            }
            (extent as usize).max(1)
        }
    };
    if n == 0 {
        return Err(FlowError::InvalidResolution(n));
    }

    let x0 = x_origin.unwrap_or(-width / 2.0);
    let y0 = y_origin.unwrap_or(-height / 2.0);
    log::debug!(
        "building {}x{} grid over [{}, {}] x [{}, {}]",
        n,
        n,
        x0,
        x0 + width,
        y0,
        y0 + height
    );

    Ok(Grid::from_samples(
        linspace(x0, x0 + width, n),
        linspace(y0, y0 + height, n),
    ))
}
