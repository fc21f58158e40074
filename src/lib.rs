//! Two-dimensional inviscid, incompressible potential flow built by superposing elementary
//! solutions (source/sink, doublet, vortex, freestream) over a rectangular grid, plus the
//! NACA 4-digit airfoil outlines usually overlaid on such fields.
//!
//! ```no_run
//! use potential_flow_rs::elementary::{ElementarySolution, FlowElement, Freestream};
//! use potential_flow_rs::field::evaluate_all;
//! use potential_flow_rs::grid::build_grid;
//! use potential_flow_rs::stagnation::{find_stagnation_points, DEFAULT_TOLERANCE};
//! use ncollide2d::na::Point2;
//!
//! let grid = build_grid(10.0, 5.0, None, None, Some(200)).unwrap();
//! let elements: Vec<FlowElement> = vec![
//!     Freestream::new(1.0, 0.0).unwrap().into(),
//!     ElementarySolution::source_sink(Point2::new(-1.0, 0.0), 5.0).into(),
//!     ElementarySolution::source_sink(Point2::new(1.0, 0.0), -5.0).into(),
//! ];
//! let field = evaluate_all(&elements, &grid).unwrap();
//! let stagnation = find_stagnation_points(&field, DEFAULT_TOLERANCE);
//! ```

pub mod airfoil;
pub mod algorithms;
pub mod elementary;
pub mod errors;
pub mod field;
pub mod grid;
pub mod scene;
pub mod serialize;
pub mod stagnation;

pub use errors::{FlowError, FlowResult};
