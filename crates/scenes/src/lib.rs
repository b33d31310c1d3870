#![deny(unsafe_code)]
//! Scene registry: maps scene names to configured renderers and turns their
//! output into drawable frames.
//!
//! Sits between `fieldfx-core` (the renderer and layouts) and the browser
//! adapter in `fieldfx-wasm`, so that name-based construction, drawing data
//! and snapshots live in one host-testable place.

pub mod frame;
pub mod hero_grid;
pub mod skills_graph;
pub mod snapshot;
pub mod svg;

use fieldfx_core::{DVec2, FieldError, ReactiveFieldRenderer, SceneSeed};
use frame::Frame;
use hero_grid::HeroGrid;
use serde_json::Value;
use skills_graph::SkillsGraph;

const SCENE_NAMES: &[&str] = &["hero-grid", "skills-graph"];

/// A configured effect: a renderer, its layout and how to draw it.
///
/// Object safe, so callers can hold `Box<dyn Scene>`.
pub trait Scene {
    fn name(&self) -> &'static str;

    fn renderer(&self) -> &ReactiveFieldRenderer;

    /// Mutable access for staging pointer/impulse input and ticking.
    fn renderer_mut(&mut self) -> &mut ReactiveFieldRenderer;

    /// Field width and height in field units.
    fn size(&self) -> DVec2;

    /// Rebuilds the layout for a new field size.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError>;

    /// Drawable primitives for the renderer's current live positions.
    fn frame(&self) -> Result<Frame, FieldError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema of accepted parameters: type, default, range, description.
    fn param_schema(&self) -> Value;
}

/// All available scenes.
pub enum SceneKind {
    HeroGrid(HeroGrid),
    SkillsGraph(SkillsGraph),
}

impl SceneKind {
    /// Constructs a scene by name.
    ///
    /// Returns `FieldError::UnknownScene` for unrecognized names.
    pub fn from_name(
        name: &str,
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FieldError> {
        let scene = match name {
            "hero-grid" => SceneKind::HeroGrid(HeroGrid::from_json(width, height, seed, params)?),
            "skills-graph" => {
                SceneKind::SkillsGraph(SkillsGraph::from_json(width, height, seed, params)?)
            }
            _ => return Err(FieldError::UnknownScene(name.to_string())),
        };
        log::debug!("scene {name} built at {width}x{height}, seed {seed}");
        Ok(scene)
    }

    /// Rebuilds the scene a [`SceneSeed`] describes.
    pub fn from_seed(seed: &SceneSeed) -> Result<Self, FieldError> {
        seed.validate()?;
        Self::from_name(&seed.scene, seed.width, seed.height, seed.seed, &seed.params)
    }

    /// Names accepted by [`SceneKind::from_name`].
    pub fn list_scenes() -> &'static [&'static str] {
        SCENE_NAMES
    }

    fn inner(&self) -> &dyn Scene {
        match self {
            SceneKind::HeroGrid(s) => s,
            SceneKind::SkillsGraph(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Scene {
        match self {
            SceneKind::HeroGrid(s) => s,
            SceneKind::SkillsGraph(s) => s,
        }
    }
}

impl Scene for SceneKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn renderer(&self) -> &ReactiveFieldRenderer {
        self.inner().renderer()
    }

    fn renderer_mut(&mut self) -> &mut ReactiveFieldRenderer {
        self.inner_mut().renderer_mut()
    }

    fn size(&self) -> DVec2 {
        self.inner().size()
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        self.inner_mut().resize(width, height)
    }

    fn frame(&self) -> Result<Frame, FieldError> {
        self.inner().frame()
    }

    fn params(&self) -> Value {
        self.inner().params()
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_listed_scene_builds() {
        for &name in SceneKind::list_scenes() {
            let scene = SceneKind::from_name(name, 400.0, 300.0, 42, &json!({})).unwrap();
            assert_eq!(scene.name(), name);
            assert_eq!(scene.size(), DVec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn unknown_scene_is_rejected() {
        let result = SceneKind::from_name("contact-3d", 100.0, 100.0, 1, &json!({}));
        assert!(matches!(result, Err(FieldError::UnknownScene(_))));
    }

    #[test]
    fn bad_params_surface_as_invalid_config() {
        let result =
            SceneKind::from_name("hero-grid", 100.0, 60.0, 1, &json!({"pointer_smoothing": 3}));
        assert!(matches!(result, Err(FieldError::InvalidConfig { .. })));
    }

    #[test]
    fn from_seed_matches_from_name() {
        let mut seed = SceneSeed::new("skills-graph", 900.0, 520.0, 11);
        seed.params = json!({"connect_distance": 100});
        let a = SceneKind::from_seed(&seed).unwrap();
        let b = SceneKind::from_name("skills-graph", 900.0, 520.0, 11, &seed.params).unwrap();
        assert_eq!(a.renderer().points(), b.renderer().points());
        assert_eq!(a.params(), b.params());
    }

    #[test]
    fn from_seed_validates_dimensions() {
        let seed = SceneSeed::new("hero-grid", 0.0, 60.0, 1);
        assert!(matches!(
            SceneKind::from_seed(&seed),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn delegation_reaches_the_renderer() {
        let mut scene = SceneKind::from_name("hero-grid", 100.0, 60.0, 1, &json!({})).unwrap();
        scene.renderer_mut().add_impulse(0.5).unwrap();
        assert_eq!(scene.renderer().impulse(), 0.5);
        scene.resize(50.0, 30.0).unwrap();
        assert_eq!(scene.size(), DVec2::new(50.0, 30.0));
        assert!(scene.param_schema().get("influence_radius").is_some());
    }

    #[test]
    fn scenes_work_as_trait_objects() {
        let scenes: Vec<Box<dyn Scene>> = SceneKind::list_scenes()
            .iter()
            .map(|n| {
                Box::new(SceneKind::from_name(n, 640.0, 480.0, 1, &json!({})).unwrap())
                    as Box<dyn Scene>
            })
            .collect();
        for s in &scenes {
            assert!(!s.frame().unwrap().is_empty());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grid_points_beyond_radius_stay_on_lattice(
                x in -20.0_f64..120.0,
                y in -20.0_f64..80.0,
                ticks in 1_usize..60,
            ) {
                let mut scene = SceneKind::from_name("hero-grid", 100.0, 60.0, 1, &json!({})).unwrap();
                scene.renderer_mut().set_pointer(x, y).unwrap();
                for _ in 0..ticks {
                    scene.renderer_mut().tick(1.0 / 60.0).unwrap();
                }
                let r = scene.renderer();
                let ptr = r.pointer().smoothed();
                let radius = r.config().influence_radius;
                for p in r.points() {
                    if p.rest().distance(ptr) >= radius {
                        prop_assert_eq!(p.live(), p.rest());
                    }
                }
            }
        }
    }
}
