//! Pointer target, smoothed pointer and decaying impulse.
//!
//! Event callbacks only stage values here (`set_target`, `add_impulse`);
//! the smoothed position and the impulse advance in [`PointerState::advance`],
//! which the renderer calls exactly once per tick.

use crate::config::{FieldConfig, SmoothingMode};
use glam::DVec2;

#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    target: DVec2,
    smoothed: DVec2,
    present: bool,
    impulse: f64,
}

impl PointerState {
    /// Absent pointer whose smoothed position starts at `origin`.
    pub fn new(origin: DVec2) -> Self {
        Self {
            target: origin,
            smoothed: origin,
            present: false,
            impulse: 0.0,
        }
    }

    /// Last staged target.
    pub fn target(&self) -> DVec2 {
        self.target
    }

    /// Lagged position that actually displaces points.
    pub fn smoothed(&self) -> DVec2 {
        self.smoothed
    }

    /// Whether the pointer is inside the field and exerts influence.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Current impulse, always in [0, 1].
    pub fn impulse(&self) -> f64 {
        self.impulse
    }

    /// Stages `target` and marks the pointer present.
    ///
    /// A non-finite target is infinitely far from every point, so it is
    /// treated as the pointer leaving the field.
    pub fn set_target(&mut self, target: DVec2) {
        if !target.is_finite() {
            self.present = false;
            return;
        }
        self.target = target;
        self.present = true;
    }

    /// Marks the pointer absent; the smoothed position stays where it was.
    pub fn release(&mut self) {
        self.present = false;
    }

    /// Adds `delta` and clamps the total to [0, 1]. NaN is ignored.
    pub fn add_impulse(&mut self, delta: f64) {
        if delta.is_nan() {
            return;
        }
        self.impulse = (self.impulse + delta).clamp(0.0, 1.0);
    }

    /// Moves the smoothed pointer toward the target and decays the impulse.
    pub fn advance(&mut self, config: &FieldConfig, dt: f64) {
        let (k, decay) = match config.smoothing_mode {
            SmoothingMode::PerFrame => (config.pointer_smoothing, config.impulse_decay),
            SmoothingMode::TimeScaled { reference_fps } => {
                let frames = dt * reference_fps;
                (
                    1.0 - (1.0 - config.pointer_smoothing).powf(frames),
                    config.impulse_decay.powf(frames),
                )
            }
        };
        self.smoothed += (self.target - self.smoothed) * k;
        self.impulse *= decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_frame(smoothing: f64, decay: f64) -> FieldConfig {
        FieldConfig {
            pointer_smoothing: smoothing,
            impulse_decay: decay,
            ..FieldConfig::default()
        }
    }

    #[test]
    fn set_target_does_not_move_smoothed() {
        let mut p = PointerState::new(DVec2::ZERO);
        p.set_target(DVec2::new(10.0, 0.0));
        assert_eq!(p.smoothed(), DVec2::ZERO);
        assert!(p.is_present());
    }

    #[test]
    fn full_smoothing_converges_in_one_step() {
        let mut p = PointerState::new(DVec2::ZERO);
        p.set_target(DVec2::new(5.0, -2.0));
        p.advance(&per_frame(1.0, 1.0), 0.016);
        assert_eq!(p.smoothed(), DVec2::new(5.0, -2.0));
    }

    #[test]
    fn zero_smoothing_never_moves() {
        let mut p = PointerState::new(DVec2::ZERO);
        p.set_target(DVec2::new(5.0, 5.0));
        for _ in 0..10 {
            p.advance(&per_frame(0.0, 1.0), 0.016);
        }
        assert_eq!(p.smoothed(), DVec2::ZERO);
    }

    #[test]
    fn impulse_is_clamped_to_unit_interval() {
        let mut p = PointerState::new(DVec2::ZERO);
        p.add_impulse(40.0);
        assert_eq!(p.impulse(), 1.0);
        p.add_impulse(-3.0);
        assert_eq!(p.impulse(), 0.0);
        p.add_impulse(f64::NAN);
        assert_eq!(p.impulse(), 0.0);
    }

    #[test]
    fn impulse_halves_per_tick() {
        let mut p = PointerState::new(DVec2::ZERO);
        p.add_impulse(1.0);
        let cfg = per_frame(0.5, 0.5);
        let mut seen = Vec::new();
        for _ in 0..3 {
            p.advance(&cfg, 0.016);
            seen.push(p.impulse());
        }
        assert_eq!(seen, vec![0.5, 0.25, 0.125]);
    }

    #[test]
    fn time_scaled_is_frame_rate_independent() {
        let cfg = FieldConfig {
            pointer_smoothing: 0.1,
            impulse_decay: 0.9,
            smoothing_mode: SmoothingMode::TimeScaled { reference_fps: 60.0 },
            ..FieldConfig::default()
        };
        let mut at_60 = PointerState::new(DVec2::ZERO);
        let mut at_30 = PointerState::new(DVec2::ZERO);
        for p in [&mut at_60, &mut at_30] {
            p.set_target(DVec2::new(100.0, 0.0));
            p.add_impulse(1.0);
        }
        for _ in 0..60 {
            at_60.advance(&cfg, 1.0 / 60.0);
        }
        for _ in 0..30 {
            at_30.advance(&cfg, 1.0 / 30.0);
        }
        assert!((at_60.smoothed().x - at_30.smoothed().x).abs() < 1e-9);
        assert!((at_60.impulse() - at_30.impulse()).abs() < 1e-12);
    }

    #[test]
    fn time_scaled_zero_dt_is_a_no_op() {
        let cfg = FieldConfig {
            smoothing_mode: SmoothingMode::TimeScaled { reference_fps: 60.0 },
            ..FieldConfig::default()
        };
        let mut p = PointerState::new(DVec2::ZERO);
        p.set_target(DVec2::new(1.0, 1.0));
        p.add_impulse(0.5);
        p.advance(&cfg, 0.0);
        assert_eq!(p.smoothed(), DVec2::ZERO);
        assert_eq!(p.impulse(), 0.5);
    }

    #[test]
    fn non_finite_target_counts_as_absent() {
        let mut p = PointerState::new(DVec2::new(1.0, 1.0));
        p.set_target(DVec2::new(4.0, 1.0));
        assert!(p.is_present());
        p.set_target(DVec2::new(f64::INFINITY, 0.0));
        assert!(!p.is_present());
        assert_eq!(p.target(), DVec2::new(4.0, 1.0));
        p.advance(&per_frame(0.5, 1.0), 0.016);
        assert!(p.smoothed().is_finite());
    }
}
