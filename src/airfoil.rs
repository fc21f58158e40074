use crate::errors::FlowResult;
use crate::serialize::point_list;
use ncollide2d::na::Point2;
use serde::Serialize;

pub mod common;
pub mod generate;

pub use common::{ChordSpacing, Naca4Options};
pub use generate::{AirfoilGenerator, Naca4Digit};

/// The camber point at one chord fraction together with the matching points on the upper and
/// lower surfaces.
pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// Camber line and surfaces of an airfoil, each ordered from the leading edge to the trailing
/// edge.
pub struct Airfoil {
    pub camber: Vec<Point2<f64>>,
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
}

impl Airfoil {
    pub fn from_stations(stations: &[CamberStation]) -> Airfoil {
        Airfoil {
            camber: stations.iter().map(|s| s.camber).collect(),
            upper: stations.iter().map(|s| s.upper).collect(),
            lower: stations.iter().map(|s| s.lower).collect(),
        }
    }

    /// Closed outline running from the trailing edge along the upper surface, around the leading
    /// edge, and back along the lower surface. With `dedup_leading_edge` the first lower point is
    /// dropped since it coincides with the last upper point.
    pub fn to_outer_contour(&self, dedup_leading_edge: bool) -> AirfoilCoordinates {
        let mut result: Vec<Point2<f64>> = self.upper.iter().rev().copied().collect();
        let skip = usize::from(dedup_leading_edge);
        result.extend(self.lower.iter().skip(skip).copied());
        AirfoilCoordinates { points: result }
    }
}

/// Ordered outline of an airfoil section with a unit chord.
#[derive(Clone, Debug, Serialize)]
pub struct AirfoilCoordinates {
    #[serde(serialize_with = "point_list")]
    points: Vec<Point2<f64>>,
}

impl AirfoilCoordinates {
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// Generates the outline of a NACA 4-digit airfoil with `n` points per side, `2n + 1` in total.
pub fn generate_naca4(
    designation: &str,
    n: usize,
    finite_trailing_edge: bool,
    half_cosine_spacing: bool,
) -> FlowResult<AirfoilCoordinates> {
    let spacing = if half_cosine_spacing {
        ChordSpacing::HalfCosine
    } else {
        ChordSpacing::Linear
    };
    generate_naca4_with(
        designation,
        n,
        &Naca4Options {
            finite_trailing_edge,
            spacing,
            ..Naca4Options::default()
        },
    )
}

pub fn generate_naca4_with(
    designation: &str,
    n: usize,
    options: &Naca4Options,
) -> FlowResult<AirfoilCoordinates> {
    let naca = designation
        .parse::<Naca4Digit>()?
        .with_finite_trailing_edge(options.finite_trailing_edge);
    let airfoil = naca.generate(options.spacing, n)?;
    log::debug!(
        "generated NACA {} with {} points per side",
        designation,
        n
    );
    Ok(airfoil.to_outer_contour(options.dedup_leading_edge))
}
