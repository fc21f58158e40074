use crate::airfoil::{generate_naca4_with, AirfoilCoordinates, Naca4Options};
use crate::elementary::{ElementaryFlow, ElementarySolution, FlowElement, FlowKind, Freestream};
use crate::errors::FlowResult;
use crate::field::{evaluate_all, VelocityField};
use crate::grid::{Grid, GridParams};
use crate::serialize::{matrix_rows, optional_matrix_rows};
use crate::stagnation::{find_stagnation_points, StagnationParams, StagnationPoints};
use ncollide2d::na::{DMatrix, Point2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One flow element as written in a scene file, tagged by `"type"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementConfig {
    SourceSink {
        location: [f64; 2],
        strength: f64,
    },
    Doublet {
        location: [f64; 2],
        strength: f64,
    },
    Vortex {
        location: [f64; 2],
        strength: f64,
    },
    Freestream {
        velocity: f64,
        #[serde(default)]
        angle_of_incidence: f64,
    },
}

impl ElementConfig {
    pub fn build(&self) -> FlowResult<FlowElement> {
        let at = |l: &[f64; 2]| Point2::new(l[0], l[1]);
        let element = match self {
            ElementConfig::SourceSink { location, strength } => {
                ElementarySolution::source_sink(at(location), *strength).into()
            }
            ElementConfig::Doublet { location, strength } => {
                ElementarySolution::doublet(at(location), *strength).into()
            }
            ElementConfig::Vortex { location, strength } => {
                ElementarySolution::vortex(at(location), *strength).into()
            }
            ElementConfig::Freestream {
                velocity,
                angle_of_incidence,
            } => Freestream::new(*velocity, *angle_of_incidence)?.into(),
        };
        Ok(element)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AirfoilConfig {
    pub designation: String,
    pub points: usize,

    #[serde(flatten)]
    pub options: Naca4Options,
}

/// A complete run: the grid, the elements superposed on it, and the optional airfoil overlay.
#[derive(Clone, Debug, Deserialize)]
pub struct Scene {
    pub grid: GridParams,

    #[serde(default)]
    pub elements: Vec<ElementConfig>,

    #[serde(default)]
    pub airfoil: Option<AirfoilConfig>,

    #[serde(default)]
    pub stagnation: StagnationParams,
}

/// What a renderer needs to place a marker for an element.
#[derive(Clone, Debug, Serialize)]
pub struct ElementMarker {
    pub kind: FlowKind,
    pub name: &'static str,
    pub location: Option<[f64; 2]>,
}

impl ElementMarker {
    fn new(element: &FlowElement) -> Self {
        let location = match element {
            FlowElement::Singularity(s) => Some([s.location().x, s.location().y]),
            FlowElement::Freestream(_) => None,
        };
        ElementMarker {
            kind: element.kind(),
            name: element.name(),
            location,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SceneOutput {
    pub grid: Grid,
    pub elements: Vec<ElementMarker>,
    pub field: VelocityField,

    #[serde(serialize_with = "matrix_rows")]
    pub speed: DMatrix<f64>,

    /// Only present when the scene has a freestream to reference the pressure to
    #[serde(serialize_with = "optional_matrix_rows")]
    pub pressure_coefficient: Option<DMatrix<f64>>,
    pub stagnation: StagnationPoints,
    pub airfoil: Option<AirfoilCoordinates>,
}

impl Scene {
    pub fn from_json(text: &str) -> FlowResult<Scene> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> FlowResult<Scene> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn run(&self) -> FlowResult<SceneOutput> {
        let grid = self.grid.build()?;
        let elements = self
            .elements
            .iter()
            .map(|e| e.build())
            .collect::<FlowResult<Vec<FlowElement>>>()?;
        log::info!(
            "running scene with {} elements on a {:?} grid",
            elements.len(),
            grid.shape()
        );

        let field = evaluate_all(&elements, &grid)?;
        let speed = field.speed();
        let v_inf = freestream_speed(&elements);
        let pressure_coefficient = if v_inf > 0.0 {
            Some(field.pressure_coefficient(v_inf))
        } else {
            None
        };

        let found = find_stagnation_points(&field, self.stagnation.tolerance);
        if found.is_empty() {
            log::info!(
                "no stagnation nodes below {:e}; refine the grid or relax the tolerance",
                self.stagnation.tolerance
            );
        }
        let stagnation = StagnationPoints::new(found, &grid);

        let airfoil = self
            .airfoil
            .as_ref()
            .map(|a| generate_naca4_with(&a.designation, a.points, &a.options))
            .transpose()?;

        Ok(SceneOutput {
            elements: elements.iter().map(ElementMarker::new).collect(),
            grid,
            field,
            speed,
            pressure_coefficient,
            stagnation,
            airfoil,
        })
    }
}

/// Magnitude of the combined freestream velocity of all freestream elements
fn freestream_speed(elements: &[FlowElement]) -> f64 {
    let (u, v) = elements
        .iter()
        .filter_map(|e| match e {
            FlowElement::Freestream(f) => Some(f.components()),
            FlowElement::Singularity(_) => None,
        })
        .fold((0.0, 0.0), |(u, v), (fu, fv)| (u + fu, v + fv));
    (u * u + v * v).sqrt()
}
