use crate::algorithms::linspace;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How the chord fractions of the airfoil stations are distributed over `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordSpacing {
    /// Evenly spaced fractions
    #[default]
    Linear,

    /// Fractions at `0.5 * (1 - cos θ)` for evenly spaced `θ` in `[0, π]`, which clusters
    /// stations at both the leading and trailing edge
    HalfCosine,
}

impl ChordSpacing {
    /// Returns `n + 1` chord fractions from 0.0 to 1.0 inclusive
    pub fn samples(&self, n: usize) -> Vec<f64> {
        match self {
            ChordSpacing::Linear => linspace(0.0, 1.0, n + 1),
            ChordSpacing::HalfCosine => linspace(0.0, PI, n + 1)
                .into_iter()
                .map(|t| 0.5 * (1.0 - t.cos()))
                .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Naca4Options {
    /// Leave the small finite gap at the trailing edge instead of closing it to zero thickness
    pub finite_trailing_edge: bool,
    pub spacing: ChordSpacing,

    /// Drop the lower surface's leading-edge point, which repeats the last upper surface point
    pub dedup_leading_edge: bool,
}

impl Default for Naca4Options {
    fn default() -> Self {
        Naca4Options {
            finite_trailing_edge: false,
            spacing: ChordSpacing::Linear,
            dedup_leading_edge: true,
        }
    }
}
