use thiserror::Error;

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("grid extent must be positive and finite, got {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("grid resolution must be at least 1, got {0}")]
    InvalidResolution(usize),

    #[error("grid extent {extent} is too large to derive a default resolution from")]
    ResolutionTooLarge { extent: f64 },

    #[error("malformed NACA 4-digit designation {0:?}")]
    InvalidDesignation(String),

    #[error("airfoil needs at least one point per side, got {0}")]
    InvalidPointCount(usize),

    #[error("invalid freestream: velocity {velocity}, angle of incidence {angle} deg")]
    InvalidFreestream { velocity: f64, angle: f64 },

    #[error("velocity field shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("cannot superpose an empty set of velocity fields")]
    EmptySuperposition,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
