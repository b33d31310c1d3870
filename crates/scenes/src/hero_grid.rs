//! Hero background: a lattice that bends toward the cursor.
//!
//! The field is the SVG viewBox (100 x 60 by default). Scroll impulse
//! amplifies the bend and decays at 0.92 per frame.

use crate::frame::{Dot, Frame, Polyline};
use crate::Scene;
use fieldfx_core::params::param_usize;
use fieldfx_core::{
    DVec2, FieldConfig, FieldError, GridLayout, Layout, Polarity, ReactiveFieldRenderer,
    MAX_GRID_POINTS,
};
use serde_json::{json, Value};

/// Grid cells across and down when params leave them out.
pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_ROWS: usize = 12;
const LINE_STROKE: &str = "rgba(255,255,255,0.04)";
const LINE_WIDTH: f64 = 0.12;
const ACCENT_FILL: &str = "rgba(200,255,0,0.5)";
const ACCENT_RADIUS: f64 = 0.6;

/// Field config tuned for the hero grid.
pub fn default_config() -> FieldConfig {
    FieldConfig {
        influence_radius: 30.0,
        base_strength: 4.0,
        impulse_gain: 8.0,
        pointer_smoothing: 0.06,
        impulse_decay: 0.92,
        polarity: Polarity::Attract,
        ..FieldConfig::default()
    }
}

/// The hero lattice: a [`GridLayout`] driven by a renderer.
pub struct HeroGrid {
    layout: GridLayout,
    renderer: ReactiveFieldRenderer,
    size: DVec2,
    seed: u64,
}

impl HeroGrid {
    /// Builds the lattice for a `width` x `height` field.
    pub fn new(
        width: f64,
        height: f64,
        seed: u64,
        layout: GridLayout,
        config: FieldConfig,
    ) -> Result<Self, FieldError> {
        let points = layout.build(width, height, seed)?;
        let renderer = ReactiveFieldRenderer::create(points, config)?;
        Ok(Self {
            layout,
            renderer,
            size: DVec2::new(width, height),
            seed,
        })
    }

    /// Builds from a loose params object (`cols`, `rows` and any
    /// [`FieldConfig`] key).
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FieldError> {
        let layout = GridLayout::new(
            param_usize(params, "cols", DEFAULT_COLS),
            param_usize(params, "rows", DEFAULT_ROWS),
        );
        let config = FieldConfig::from_json(params, default_config())?;
        Self::new(width, height, seed, layout, config)
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
}

impl Scene for HeroGrid {
    fn name(&self) -> &'static str {
        "hero-grid"
    }

    fn renderer(&self) -> &ReactiveFieldRenderer {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut ReactiveFieldRenderer {
        &mut self.renderer
    }

    fn size(&self) -> DVec2 {
        self.size
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        let points = self.layout.build(width, height, self.seed)?;
        self.renderer.relayout(points)?;
        self.size = DVec2::new(width, height);
        Ok(())
    }

    fn frame(&self) -> Result<Frame, FieldError> {
        if self.renderer.is_disposed() {
            return Err(FieldError::Disposed);
        }
        let points = self.renderer.points();
        // `renderer_mut().relayout` can swap in a point set of another shape
        let expected = self.layout.point_count().unwrap_or(0);
        if points.len() != expected {
            return Err(FieldError::LayoutMismatch {
                expected,
                actual: points.len(),
            });
        }
        let line = |run: Vec<usize>| Polyline {
            points: run
                .into_iter()
                .filter_map(|i| points.get(i).map(|p| p.live()))
                .collect(),
            stroke: LINE_STROKE.to_string(),
            stroke_width: LINE_WIDTH,
        };
        let mut polylines: Vec<Polyline> = self.layout.row_runs().map(line).collect();
        polylines.extend(self.layout.column_runs().map(line));

        let pointer = self.renderer.pointer();
        let dots = if pointer.is_present() && !self.renderer.reduced_motion() {
            vec![Dot {
                center: pointer.smoothed(),
                radius: ACCENT_RADIUS,
                fill: ACCENT_FILL.to_string(),
            }]
        } else {
            Vec::new()
        };
        Ok(Frame {
            polylines,
            dots,
            ..Frame::default()
        })
    }

    fn params(&self) -> Value {
        let mut v = self.renderer.config().to_params();
        v["cols"] = json!(self.layout.cols);
        v["rows"] = json!(self.layout.rows);
        v
    }

    fn param_schema(&self) -> Value {
        let mut schema = default_config().param_schema();
        schema["cols"] = json!({
            "type": "integer",
            "default": DEFAULT_COLS,
            "min": 1,
            "max_points": MAX_GRID_POINTS,
            "description": "Grid cells across"
        });
        schema["rows"] = json!({
            "type": "integer",
            "default": DEFAULT_ROWS,
            "min": 1,
            "max_points": MAX_GRID_POINTS,
            "description": "Grid cells down"
        });
        schema
    }
}
