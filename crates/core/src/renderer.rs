//! The reactive field renderer.
//!
//! Holds a fixed set of rest points and a [`PointerState`]. Each [`tick`]
//! advances the smoothed pointer, decays the impulse and recomputes every
//! point's live position from its rest position:
//!
//! ```text
//! dist     = |rest - pointer|
//! inf      = 1 - dist / influence_radius        (0 when dist >= radius)
//! strength = base_strength + impulse * impulse_gain
//! live     = rest + drift + polarity * unit(rest - pointer) * ease(inf) * strength
//! ```
//!
//! `tick` is a pure function of the renderer state and `dt`: replaying the
//! same calls yields bit-identical frames.
//!
//! [`tick`]: ReactiveFieldRenderer::tick

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::point::Point;
use crate::pointer::PointerState;
use glam::DVec2;

/// Point count above which [`ReactiveFieldRenderer::connections`] logs a warning.
///
/// The pair scan is O(n²); it is meant for node graphs of tens of points.
pub const CONNECTION_POINT_CEILING: usize = 256;

/// A line between two same-category points, by index into the point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Lower index of the pair.
    pub a: usize,
    /// Higher index of the pair.
    pub b: usize,
    /// `1 - dist / max_distance`, in (0, 1].
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct ReactiveFieldRenderer {
    points: Vec<Point>,
    config: FieldConfig,
    pointer: PointerState,
    elapsed: f64,
    reduced_motion: bool,
    disposed: bool,
}

impl ReactiveFieldRenderer {
    /// Builds a renderer over `points`.
    ///
    /// Fails with [`FieldError::EmptyPointSet`] for an empty set and
    /// [`FieldError::InvalidConfig`] for an out-of-range config. The pointer
    /// starts absent, with its smoothed position at the centroid of the rest
    /// points.
    pub fn create(points: Vec<Point>, config: FieldConfig) -> Result<Self, FieldError> {
        if points.is_empty() {
            return Err(FieldError::EmptyPointSet);
        }
        config.validate()?;
        let origin = centroid(&points);
        log::debug!(
            "field renderer created: {} points, radius {}",
            points.len(),
            config.influence_radius
        );
        let mut renderer = Self {
            points,
            config,
            pointer: PointerState::new(origin),
            elapsed: 0.0,
            reduced_motion: false,
            disposed: false,
        };
        renderer.reset_live();
        Ok(renderer)
    }

    /// Stages a new pointer target in field coordinates.
    ///
    /// Non-finite coordinates count as the pointer leaving the field.
    pub fn set_pointer(&mut self, x: f64, y: f64) -> Result<(), FieldError> {
        self.ensure_live()?;
        self.pointer.set_target(DVec2::new(x, y));
        Ok(())
    }

    /// Marks the pointer as having left the field; points relax to rest.
    pub fn release_pointer(&mut self) -> Result<(), FieldError> {
        self.ensure_live()?;
        self.pointer.release();
        Ok(())
    }

    /// Adds transient energy; the stored impulse is clamped to [0, 1].
    pub fn add_impulse(&mut self, delta: f64) -> Result<(), FieldError> {
        self.ensure_live()?;
        self.pointer.add_impulse(delta);
        Ok(())
    }

    /// Suppresses pointer displacement and idle drift while enabled.
    pub fn set_reduced_motion(&mut self, enabled: bool) -> Result<(), FieldError> {
        self.ensure_live()?;
        self.reduced_motion = enabled;
        Ok(())
    }

    /// Replaces the point set wholesale, e.g. after a container resize.
    ///
    /// Pointer state and elapsed time carry over.
    pub fn relayout(&mut self, points: Vec<Point>) -> Result<(), FieldError> {
        self.ensure_live()?;
        if points.is_empty() {
            return Err(FieldError::EmptyPointSet);
        }
        log::debug!("field renderer relayout: {} points", points.len());
        self.points = points;
        self.reset_live();
        Ok(())
    }

    /// Advances one frame and returns the updated points.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f64) -> Result<&[Point], FieldError> {
        self.ensure_live()?;
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.elapsed += dt;
        self.pointer.advance(&self.config, dt);

        if self.reduced_motion {
            self.points.iter_mut().for_each(|p| p.set_live(p.rest()));
            return Ok(&self.points);
        }

        let pointer = self.pointer.is_present().then(|| self.pointer.smoothed());
        let strength =
            self.config.base_strength + self.pointer.impulse() * self.config.impulse_gain;
        let radius = self.config.influence_radius;
        let easing = self.config.easing;
        let sign = self.config.polarity.sign();
        let elapsed = self.elapsed;

        for p in &mut self.points {
            let base = p.drifted_rest(elapsed);
            let offset = match pointer {
                Some(ptr) => {
                    let delta = p.rest() - ptr;
                    let dist = delta.length();
                    if dist > 0.0 && dist < radius {
                        let eased = easing.apply(1.0 - dist / radius);
                        delta / dist * (sign * eased * strength)
                    } else {
                        DVec2::ZERO
                    }
                }
                None => DVec2::ZERO,
            };
            p.set_live(base + offset);
        }
        Ok(&self.points)
    }

    /// Same-category pairs whose live distance is below `max_distance`.
    ///
    /// Each unordered pair appears once with `a < b`; uncategorized points
    /// never connect. A non-positive or NaN `max_distance` yields no pairs.
    pub fn connections(&self, max_distance: f64) -> Result<Vec<Connection>, FieldError> {
        self.ensure_live()?;
        if max_distance.is_nan() || max_distance <= 0.0 {
            return Ok(Vec::new());
        }
        if self.points.len() > CONNECTION_POINT_CEILING {
            log::warn!(
                "connections over {} points exceeds the ceiling of {}",
                self.points.len(),
                CONNECTION_POINT_CEILING
            );
        }
        let mut out = Vec::new();
        for (i, a) in self.points.iter().enumerate() {
            let Some(cat) = a.category() else { continue };
            for (j, b) in self.points.iter().enumerate().skip(i + 1) {
                if b.category() != Some(cat) {
                    continue;
                }
                let dist = a.live().distance(b.live());
                if dist < max_distance {
                    out.push(Connection {
                        a: i,
                        b: j,
                        weight: 1.0 - dist / max_distance,
                    });
                }
            }
        }
        Ok(out)
    }

    /// Tears the renderer down. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if !self.disposed {
            log::debug!("field renderer disposed");
        }
        self.disposed = true;
        self.points = Vec::new();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current point set; empty after dispose.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Current impulse in [0, 1].
    pub fn impulse(&self) -> f64 {
        self.pointer.impulse()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Seconds accumulated over all ticks.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn ensure_live(&self) -> Result<(), FieldError> {
        if self.disposed {
            Err(FieldError::Disposed)
        } else {
            Ok(())
        }
    }

    fn reset_live(&mut self) {
        let elapsed = self.elapsed;
        self.points
            .iter_mut()
            .for_each(|p| p.set_live(p.drifted_rest(elapsed)));
    }
}

fn centroid(points: &[Point]) -> DVec2 {
    let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + p.rest());
    sum / points.len() as f64
}
