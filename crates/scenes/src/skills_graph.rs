//! Skills section: drifting category clusters pushed aside by the cursor.
//!
//! Field units are canvas CSS pixels. Nodes of the same category are joined
//! by lines whose opacity falls off linearly up to `connect_distance`.

use crate::frame::{Frame, NodeMark, Segment};
use crate::Scene;
use fieldfx_core::params::{param_bool, param_f64};
use fieldfx_core::{
    Category, ClusterLayout, DVec2, Easing, FieldConfig, FieldError, Layout, Polarity,
    ReactiveFieldRenderer, Srgb,
};
use serde_json::{json, Value};

/// Distance below which two same-category nodes are joined.
pub const DEFAULT_CONNECT_DISTANCE: f64 = 120.0;
pub const DEFAULT_LINE_OPACITY: f64 = 0.25;
const LINE_WIDTH: f64 = 0.8;
/// Extra slack around a node's pill for hover hit-testing.
const HOVER_SLACK: f64 = 8.0;
const IDLE_FILL: &str = "rgba(20, 20, 20, 0.85)";
const IDLE_LABEL_FILL: &str = "rgba(240, 237, 232, 0.75)";

/// Field config tuned for the skills graph.
pub fn default_config() -> FieldConfig {
    FieldConfig {
        influence_radius: 80.0,
        base_strength: 20.0,
        impulse_gain: 0.0,
        pointer_smoothing: 1.0,
        impulse_decay: 0.92,
        easing: Easing::Linear,
        polarity: Polarity::Repel,
        ..FieldConfig::default()
    }
}

/// The four portfolio skill groups.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "Technical",
            Srgb::new(0xc8, 0xff, 0x00),
            &["Python", "TypeScript", "SQL", "Docker", "Git", "NumPy"],
        ),
        Category::new(
            "Analytics",
            Srgb::new(0x60, 0xa5, 0xfa),
            &["Quant Research", "Backtesting", "Statistics", "Modeling"],
        ),
        Category::new(
            "AI / ML",
            Srgb::new(0xf4, 0x72, 0xb6),
            &["XGBoost", "Time-Series", "NLP", "LLMs", "Scikit-learn"],
        ),
        Category::new(
            "Mgmt",
            Srgb::new(0xfb, 0x92, 0x3c),
            &["Leadership", "Strategy", "Operations", "Community"],
        ),
    ]
}

/// Category clusters with connection lines and hover highlighting.
pub struct SkillsGraph {
    layout: ClusterLayout,
    renderer: ReactiveFieldRenderer,
    size: DVec2,
    seed: u64,
    connect_distance: f64,
    line_opacity: f64,
}

impl SkillsGraph {
    /// Builds the clusters for a `width` x `height` canvas.
    pub fn new(
        width: f64,
        height: f64,
        seed: u64,
        layout: ClusterLayout,
        config: FieldConfig,
    ) -> Result<Self, FieldError> {
        let points = layout.build(width, height, seed)?;
        let renderer = ReactiveFieldRenderer::create(points, config)?;
        Ok(Self {
            layout,
            renderer,
            size: DVec2::new(width, height),
            seed,
            connect_distance: DEFAULT_CONNECT_DISTANCE,
            line_opacity: DEFAULT_LINE_OPACITY,
        })
    }

    /// Builds from a loose params object (`connect_distance`,
    /// `line_opacity`, `drift` and any [`FieldConfig`] key).
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FieldError> {
        let mut layout = ClusterLayout::new(default_categories());
        layout.drift = param_bool(params, "drift", true);
        let config = FieldConfig::from_json(params, default_config())?;
        let mut graph = Self::new(width, height, seed, layout, config)?;
        graph.connect_distance = param_f64(params, "connect_distance", DEFAULT_CONNECT_DISTANCE);
        graph.line_opacity =
            param_f64(params, "line_opacity", DEFAULT_LINE_OPACITY).clamp(0.0, 1.0);
        Ok(graph)
    }

    pub fn connect_distance(&self) -> f64 {
        self.connect_distance
    }

    fn color_of(&self, category: Option<u32>) -> Srgb {
        category
            .and_then(|c| self.layout.color_of(c))
            .unwrap_or(Srgb::new(0xf0, 0xed, 0xe8))
    }
}

impl Scene for SkillsGraph {
    fn name(&self) -> &'static str {
        "skills-graph"
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
        let points = self.renderer.points();
        let segments = self
            .renderer
            .connections(self.connect_distance)?
            .into_iter()
            .map(|c| {
                let (a, b) = (&points[c.a], &points[c.b]);
                Segment {
                    from: a.live(),
                    to: b.live(),
                    stroke: self
                        .color_of(a.category())
                        .to_css_rgba(c.weight * self.line_opacity),
                    stroke_width: LINE_WIDTH,
                }
            })
            .collect();

        let pointer = self.renderer.pointer();
        let cursor = pointer.is_present().then(|| pointer.smoothed());
        let nodes = points
            .iter()
            .map(|p| {
                let color = self.color_of(p.category());
                let hover = cursor
                    .map(|c| c.distance(p.live()) < p.radius + HOVER_SLACK)
                    .unwrap_or(false);
                NodeMark {
                    center: p.live(),
                    half_width: p.radius,
                    label: p.label.clone().unwrap_or_default(),
                    fill: if hover {
                        color.to_css_rgba(0.18)
                    } else {
                        IDLE_FILL.to_string()
                    },
                    stroke: color.to_css_rgba(if hover { 0.7 } else { 0.3 }),
                    label_fill: if hover {
                        color.to_css_rgba(1.0)
                    } else {
                        IDLE_LABEL_FILL.to_string()
                    },
                    hover,
                }
            })
            .collect();

        Ok(Frame {
            segments,
            nodes,
            ..Frame::default()
        })
    }

    fn params(&self) -> Value {
        let mut v = self.renderer.config().to_params();
        v["connect_distance"] = json!(self.connect_distance);
        v["line_opacity"] = json!(self.line_opacity);
        v["drift"] = json!(self.layout.drift);
        v
    }

    fn param_schema(&self) -> Value {
        let mut schema = default_config().param_schema();
        schema["connect_distance"] = json!({
            "type": "number",
            "default": DEFAULT_CONNECT_DISTANCE,
            "min": 0.0,
            "description": "Maximum distance for a same-category line"
        });
        schema["line_opacity"] = json!({
            "type": "number",
            "default": DEFAULT_LINE_OPACITY,
            "min": 0.0,
            "max": 1.0,
            "description": "Opacity of a line between coincident nodes"
        });
        schema["drift"] = json!({
            "type": "boolean",
            "default": true,
            "description": "Idle Lissajous drift around each node's rest position"
        });
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(params: Value) -> SkillsGraph {
        SkillsGraph::from_json(900.0, 520.0, 42, &params).unwrap()
    }

    #[test]
    fn builds_one_node_per_skill() {
        let g = graph(json!({}));
        assert_eq!(g.renderer().points().len(), 6 + 4 + 5 + 4);
        let f = g.frame().unwrap();
        assert_eq!(f.nodes.len(), 19);
        assert!(f.nodes.iter().all(|n| !n.hover));
    }

    #[test]
    fn lines_only_join_same_category() {
        let mut g = graph(json!({}));
        g.renderer_mut().tick(0.5).unwrap();
        let f = g.frame().unwrap();
        assert!(!f.segments.is_empty());
        let lines = g.renderer().connections(g.connect_distance()).unwrap();
        for c in &lines {
            let pts = g.renderer().points();
            assert_eq!(pts[c.a].category(), pts[c.b].category());
        }
        assert_eq!(lines.len(), f.segments.len());
    }

    #[test]
    fn line_stroke_uses_category_colour() {
        let g = graph(json!({"drift": false}));
        let f = g.frame().unwrap();
        assert!(f
            .segments
            .iter()
            .any(|s| s.stroke.starts_with("rgba(200, 255, 0,")));
    }

    #[test]
    fn hovered_node_is_highlighted_and_pushed() {
        let mut g = graph(json!({"drift": false}));
        let target = g.renderer().points()[0].rest() + DVec2::new(10.0, 0.0);
        g.renderer_mut().set_pointer(target.x, target.y).unwrap();
        g.renderer_mut().tick(1.0 / 60.0).unwrap();
        let f = g.frame().unwrap();
        assert!(f.nodes[0].hover);
        assert_eq!(f.nodes[0].label_fill, "rgba(200, 255, 0, 1.000)");
        assert_eq!(f.nodes[1].label_fill, IDLE_LABEL_FILL);
        // repelled: moved away from the cursor, i.e. toward -x
        assert!(f.nodes[0].center.x < g.renderer().points()[0].rest().x);
    }

    #[test]
    fn params_and_schema_cover_scene_keys() {
        let g = graph(json!({"connect_distance": 90, "line_opacity": 4.0}));
        let p = g.params();
        assert_eq!(p["connect_distance"], 90.0);
        assert_eq!(p["line_opacity"], 1.0);
        assert_eq!(p["polarity"], "repel");
        let schema = g.param_schema();
        for key in ["connect_distance", "line_opacity", "drift", "influence_radius"] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    #[test]
    fn frame_after_dispose_fails() {
        let mut g = graph(json!({}));
        g.renderer_mut().dispose();
        assert!(matches!(g.frame(), Err(FieldError::Disposed)));
    }
}
