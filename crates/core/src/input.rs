//! Conversions from raw browser input to field-space values.

use glam::DVec2;

/// Scroll distance (px per event) that maps to a full impulse of 1.
pub const SCROLL_IMPULSE_SCALE: f64 = 80.0;

/// Maps a viewport-pixel position into field coordinates.
///
/// A degenerate viewport maps to the field centre.
pub fn normalize_viewport(client: DVec2, viewport: DVec2, field: DVec2) -> DVec2 {
    if viewport.x > 0.0 && viewport.y > 0.0 && viewport.is_finite() {
        client / viewport * field
    } else {
        field * 0.5
    }
}

/// Turns successive scroll offsets into impulse magnitudes.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    last_y: Option<f64>,
    scale: f64,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTracker {
    /// Tracker with the default scale of [`SCROLL_IMPULSE_SCALE`] pixels per unit impulse.
    pub fn new() -> Self {
        Self::with_scale(SCROLL_IMPULSE_SCALE)
    }

    /// Tracker where `scale` pixels of scroll make a full impulse.
    pub fn with_scale(scale: f64) -> Self {
        Self {
            last_y: None,
            scale,
        }
    }

    /// Records `scroll_y` and returns `min(|Δy| / scale, 1)`.
    ///
    /// The first observation only primes the tracker and returns 0.
    pub fn observe(&mut self, scroll_y: f64) -> f64 {
        let impulse = match self.last_y {
            Some(prev) if self.scale > 0.0 => ((scroll_y - prev).abs() / self.scale).min(1.0),
            _ => 0.0,
        };
        self.last_y = Some(scroll_y);
        if impulse.is_nan() {
            0.0
        } else {
            impulse
        }
    }
}
