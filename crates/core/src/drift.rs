//! Idle drift: a slow Lissajous wobble around a point's rest position.
//!
//! Drift is additive and independent of pointer influence; it only depends on
//! the renderer's accumulated elapsed time.

use glam::DVec2;
use serde::{Deserialize, Serialize};

const DEFAULT_AMPLITUDE: DVec2 = DVec2::new(10.0, 8.0);
const DEFAULT_ANGULAR_SPEED: DVec2 = DVec2::new(0.4, 0.55);
const DEFAULT_PHASE_SKEW: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdleDrift {
    /// Phase offset in radians, usually drawn per point from a seeded PRNG.
    pub phase: f64,
    /// Peak offset along each axis, in field units.
    pub amplitude: DVec2,
    /// Radians per second along each axis.
    pub angular_speed: DVec2,
    /// Multiplier on `phase` for the y axis so the two axes decorrelate.
    pub phase_skew: f64,
}

impl IdleDrift {
    /// Default amplitudes and speeds, started at `phase` radians.
    pub fn with_phase(phase: f64) -> Self {
        Self {
            phase,
            amplitude: DEFAULT_AMPLITUDE,
            angular_speed: DEFAULT_ANGULAR_SPEED,
            phase_skew: DEFAULT_PHASE_SKEW,
        }
    }

    /// Offset from rest at `elapsed` seconds.
    pub fn offset(&self, elapsed: f64) -> DVec2 {
        DVec2::new(
            (elapsed * self.angular_speed.x + self.phase).cos() * self.amplitude.x,
            (elapsed * self.angular_speed.y + self.phase * self.phase_skew).sin()
                * self.amplitude.y,
        )
    }
}
