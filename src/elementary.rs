use crate::errors::{FlowError, FlowResult};
use crate::field::VelocityField;
use crate::grid::Grid;
use crate::serialize::Point2f64;
use ncollide2d::na::{DMatrix, Point2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Discriminator a consumer can dispatch on when drawing or labelling an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Source,
    Sink,
    Doublet,
    Vortex,
    Freestream,
}

impl FlowKind {
    pub fn name(&self) -> &'static str {
        match self {
            FlowKind::Source => "source",
            FlowKind::Sink => "sink",
            FlowKind::Doublet => "doublet",
            FlowKind::Vortex => "vortex",
            FlowKind::Freestream => "freestream",
        }
    }
}

/// A closed-form velocity field which can be evaluated anywhere in the plane.
pub trait ElementaryFlow {
    fn kind(&self) -> FlowKind;

    /// Velocity components `(u, v)` at a single point.
    fn velocity_at(&self, x: f64, y: f64) -> (f64, f64);

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Evaluates the velocity at every node of the grid. Nodes that coincide with a singularity
    /// come back as NaN or infinite values; they are reported in the log but left in place.
    fn compute_velocity_field(&self, grid: &Grid) -> VelocityField {
        let (rows, cols) = grid.shape();
        let (u, v): (Vec<f64>, Vec<f64>) = grid
            .x()
            .iter()
            .zip(grid.y().iter())
            .map(|(x, y)| self.velocity_at(*x, *y))
            .unzip();

        let field = VelocityField::new(
            DMatrix::from_vec(rows, cols, u),
            DMatrix::from_vec(rows, cols, v),
        );
        let bad = field.non_finite_count();
        if bad > 0 {
            log::warn!("{} field has {} non-finite nodes", self.name(), bad);
        }
        field
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Singularity {
    SourceSink,
    Doublet,
    Vortex,
}

/// A point singularity with a fixed location and signed strength. For a source/sink a positive
/// strength is a source. The vortex kernel is `u = Γ/2π·dy/r²`, `v = −Γ/2π·dx/r²`; flipping the
/// sign of `Γ` reverses the direction of rotation.
#[derive(Clone, Debug, Serialize)]
pub struct ElementarySolution {
    singularity: Singularity,

    #[serde(with = "Point2f64")]
    location: Point2<f64>,
    strength: f64,
}

impl ElementarySolution {
    pub fn new(singularity: Singularity, location: Point2<f64>, strength: f64) -> Self {
        ElementarySolution {
            singularity,
            location,
            strength,
        }
    }

    pub fn source_sink(location: Point2<f64>, strength: f64) -> Self {
        Self::new(Singularity::SourceSink, location, strength)
    }

    pub fn doublet(location: Point2<f64>, strength: f64) -> Self {
        Self::new(Singularity::Doublet, location, strength)
    }

    pub fn vortex(location: Point2<f64>, strength: f64) -> Self {
        Self::new(Singularity::Vortex, location, strength)
    }

    pub fn singularity(&self) -> Singularity {
        self.singularity
    }

    pub fn location(&self) -> Point2<f64> {
        self.location
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl ElementaryFlow for ElementarySolution {
    fn kind(&self) -> FlowKind {
        match self.singularity {
            Singularity::SourceSink if self.strength < 0.0 => FlowKind::Sink,
            Singularity::SourceSink => FlowKind::Source,
            Singularity::Doublet => FlowKind::Doublet,
            Singularity::Vortex => FlowKind::Vortex,
        }
    }

    fn velocity_at(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.location.x;
        let dy = y - self.location.y;
        let r2 = dx * dx + dy * dy;
        let k = self.strength / (2.0 * PI);

        match self.singularity {
            Singularity::SourceSink => (k * dx / r2, k * dy / r2),
            Singularity::Doublet => {
                let r4 = r2 * r2;
                (-k * (dx * dx - dy * dy) / r4, -k * 2.0 * dx * dy / r4)
            }
            Singularity::Vortex => (k * dy / r2, -k * dx / r2),
        }
    }
}

/// Uniform flow of a given speed, inclined from the x axis by the angle of incidence (degrees).
#[derive(Clone, Debug, Serialize)]
pub struct Freestream {
    velocity: f64,
    angle_of_incidence: f64,
    u: f64,
    v: f64,
}

impl Freestream {
    pub fn new(velocity: f64, angle_of_incidence: f64) -> FlowResult<Self> {
        if !(velocity.is_finite() && velocity >= 0.0 && angle_of_incidence.is_finite()) {
            return Err(FlowError::InvalidFreestream {
                velocity,
                angle: angle_of_incidence,
            });
        }

        let (s, c) = angle_of_incidence.to_radians().sin_cos();
        Ok(Freestream {
            velocity,
            angle_of_incidence,
            u: velocity * c,
            v: velocity * s,
        })
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn angle_of_incidence(&self) -> f64 {
        self.angle_of_incidence
    }

    pub fn components(&self) -> (f64, f64) {
        (self.u, self.v)
    }
}

impl ElementaryFlow for Freestream {
    fn kind(&self) -> FlowKind {
        FlowKind::Freestream
    }

    fn velocity_at(&self, _x: f64, _y: f64) -> (f64, f64) {
        (self.u, self.v)
    }

    fn compute_velocity_field(&self, grid: &Grid) -> VelocityField {
        let (rows, cols) = grid.shape();
        VelocityField::new(
            DMatrix::from_element(rows, cols, self.u),
            DMatrix::from_element(rows, cols, self.v),
        )
    }
}

/// The closed set of flows a scene can be composed from.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum FlowElement {
    Singularity(ElementarySolution),
    Freestream(Freestream),
}

impl From<ElementarySolution> for FlowElement {
    fn from(s: ElementarySolution) -> Self {
        FlowElement::Singularity(s)
    }
}

impl From<Freestream> for FlowElement {
    fn from(f: Freestream) -> Self {
        FlowElement::Freestream(f)
    }
}

impl ElementaryFlow for FlowElement {
    fn kind(&self) -> FlowKind {
        match self {
            FlowElement::Singularity(s) => s.kind(),
            FlowElement::Freestream(f) => f.kind(),
        }
    }

    fn velocity_at(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            FlowElement::Singularity(s) => s.velocity_at(x, y),
            FlowElement::Freestream(f) => f.velocity_at(x, y),
        }
    }

    fn compute_velocity_field(&self, grid: &Grid) -> VelocityField {
        match self {
            FlowElement::Singularity(s) => s.compute_velocity_field(grid),
            FlowElement::Freestream(f) => f.compute_velocity_field(grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use test_case::test_case;

    fn off_node_grid() -> Grid {
        // 21 samples over [-2, 2] puts nodes on multiples of 0.2, so a singularity at
        // (0.05, 0.05) never lands on one.
        build_grid(4.0, 4.0, None, None, Some(21)).unwrap()
    }

    fn assert_fields_eq(a: &VelocityField, b: &VelocityField) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.u().iter().zip(b.u().iter()) {
            assert_relative_eq!(x, y, max_relative = 1e-12);
        }
        for (x, y) in a.v().iter().zip(b.v().iter()) {
            assert_relative_eq!(x, y, max_relative = 1e-12);
        }
    }

    #[test_case(Singularity::SourceSink)]
    #[test_case(Singularity::Doublet)]
    #[test_case(Singularity::Vortex)]
    fn test_strength_linearity(singularity: Singularity) {
        let grid = off_node_grid();
        let location = Point2::new(0.05, 0.05);
        let base = ElementarySolution::new(singularity, location, 1.7).compute_velocity_field(&grid);

        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let mut k: f64 = rng.gen_range(-50.0..50.0);
            if k.abs() < 1e-3 {
                k = 1.0;
            }
            let scaled = ElementarySolution::new(singularity, location, 1.7 * k)
                .compute_velocity_field(&grid);
            assert_fields_eq(&base.scaled(k), &scaled);
        }
    }

    #[test]
    fn test_source_points_outward() {
        let s = ElementarySolution::source_sink(Point2::new(1.0, -1.0), 2.0 * PI);
        let (u, v) = s.velocity_at(3.0, -1.0);
        assert_relative_eq!(0.5, u);
        assert_relative_eq!(0.0, v);

        let sink = ElementarySolution::source_sink(Point2::new(1.0, -1.0), -2.0 * PI);
        let (u, v) = sink.velocity_at(1.0, 0.0);
        assert_relative_eq!(0.0, u);
        assert_relative_eq!(-1.0, v);
    }

    #[test]
    fn test_vortex_kernel() {
        let vortex = ElementarySolution::vortex(Point2::origin(), 2.0 * PI);
        let (u, v) = vortex.velocity_at(0.0, 1.0);
        assert_relative_eq!(1.0, u);
        assert_relative_eq!(0.0, v);

        let (u, v) = vortex.velocity_at(2.0, 0.0);
        assert_relative_eq!(0.0, u);
        assert_relative_eq!(-0.5, v);

        // Purely tangential everywhere
        let (u, v) = vortex.velocity_at(0.3, -0.7);
        assert_relative_eq!(0.0, u * 0.3 + v * -0.7, epsilon = 1e-12);

        // Flipping the sign reverses the rotation
        let reversed = ElementarySolution::vortex(Point2::origin(), -2.0 * PI);
        let (u, v) = reversed.velocity_at(0.0, 1.0);
        assert_relative_eq!(-1.0, u);
        assert_relative_eq!(0.0, v);
    }

    #[test]
    fn test_doublet_on_axes() {
        let doublet = ElementarySolution::doublet(Point2::origin(), 2.0 * PI);
        let (u, v) = doublet.velocity_at(1.0, 0.0);
        assert_relative_eq!(-1.0, u);
        assert_relative_eq!(0.0, v);

        let (u, v) = doublet.velocity_at(0.0, 2.0);
        assert_relative_eq!(0.25, u);
        assert_relative_eq!(0.0, v);

        let (_, v) = doublet.velocity_at(1.0, 1.0);
        assert_relative_eq!(-0.5, v);
    }

    #[test_case(Singularity::SourceSink)]
    #[test_case(Singularity::Doublet)]
    #[test_case(Singularity::Vortex)]
    fn test_evaluation_at_location_is_not_finite(singularity: Singularity) {
        let s = ElementarySolution::new(singularity, Point2::new(0.5, 0.5), 1.0);
        let (u, v) = s.velocity_at(0.5, 0.5);
        assert!(!u.is_finite());
        assert!(!v.is_finite());

        // The grid node at the origin coincides with the singularity
        let grid = build_grid(2.0, 2.0, None, None, Some(3)).unwrap();
        let centred = ElementarySolution::new(singularity, Point2::origin(), 1.0);
        let field = centred.compute_velocity_field(&grid);
        assert_eq!(1, field.non_finite_count());
    }

    #[test]
    fn test_freestream_zero_incidence_is_exact() {
        let grid = build_grid(10.0, 5.0, None, None, Some(50)).unwrap();
        let fs = Freestream::new(3.5, 0.0).unwrap();
        let field = fs.compute_velocity_field(&grid);
        assert!(field.u().iter().all(|u| *u == 3.5));
        assert!(field.v().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_freestream_incidence() {
        let fs = Freestream::new(2.0, 30.0).unwrap();
        let (u, v) = fs.components();
        assert_relative_eq!(3.0_f64.sqrt(), u, epsilon = 1e-12);
        assert_relative_eq!(1.0, v, epsilon = 1e-12);
        assert_eq!((u, v), fs.velocity_at(-100.0, 42.0));
    }

    #[test_case(-1.0, 0.0)]
    #[test_case(f64::NAN, 0.0)]
    #[test_case(1.0, f64::INFINITY)]
    fn test_freestream_rejects_bad_input(velocity: f64, angle: f64) {
        assert!(matches!(
            Freestream::new(velocity, angle),
            Err(FlowError::InvalidFreestream { .. })
        ));
    }

    #[test_case(ElementarySolution::source_sink(Point2::origin(), 2.0).into(), "source")]
    #[test_case(ElementarySolution::source_sink(Point2::origin(), -3.0).into(), "sink")]
    #[test_case(ElementarySolution::doublet(Point2::origin(), 1.0).into(), "doublet")]
    #[test_case(ElementarySolution::vortex(Point2::origin(), -1.0).into(), "vortex")]
    #[test_case(Freestream::new(1.0, 10.0).unwrap().into(), "freestream")]
    fn test_element_names(element: FlowElement, e: &str) {
        assert_eq!(e, element.name());
    }
}
