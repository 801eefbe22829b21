//! Time interpolators
//!
//! Map the linear elapsed fraction of an [`Animator`](crate::Animator) onto
//! the fraction actually written to the animated property.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Timing curve applied to an animator's elapsed fraction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolator {
    /// Constant rate
    Linear,
    /// Starts and ends slowly, fastest in the middle (the platform default)
    #[default]
    AccelerateDecelerate,
    /// Starts slowly and speeds up
    Accelerate,
    /// Starts quickly and slows down
    Decelerate,
}

impl Interpolator {
    /// Apply the curve to `t`, clamped to [0, 1]
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Interpolator::Linear => t,
            Interpolator::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Interpolator::Accelerate => t * t,
            Interpolator::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
