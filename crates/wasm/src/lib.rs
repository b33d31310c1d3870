#![cfg(target_arch = "wasm32")]
//! WASM bindings for fieldfx.
//!
//! [`FieldHandle`] exposes a scene's renderer to JavaScript callers that own
//! their own frame loop; [`mount_hero_grid`] and [`mount_skills_graph`] wire a
//! scene to the page directly.

mod dom;
mod mount;

pub use mount::{mount_hero_grid, mount_skills_graph, Mount};

use fieldfx_core::FieldError;
use fieldfx_scenes::svg::to_svg_document;
use fieldfx_scenes::{Scene, SceneKind};
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

pub(crate) fn to_js(e: FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Names accepted by the [`FieldHandle`] constructor, as a JSON array.
#[wasm_bindgen]
pub fn list_scenes() -> String {
    serde_json::to_string(SceneKind::list_scenes()).unwrap_or_else(|_| "[]".into())
}

/// A scene owned by JavaScript. Input and ticks are driven by the caller.
#[wasm_bindgen]
pub struct FieldHandle {
    scene: SceneKind,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Builds scene `scene` over a `width` x `height` field. `params_json` is a
    /// JSON object of overrides; an empty string means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        scene: &str,
        width: f64,
        height: f64,
        seed: u32,
        params_json: &str,
    ) -> Result<FieldHandle, JsValue> {
        let params = if params_json.trim().is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            serde_json::from_str(params_json)
                .map_err(|e| JsValue::from_str(&format!("params: {e}")))?
        };
        let scene =
            SceneKind::from_name(scene, width, height, seed as u64, &params).map_err(to_js)?;
        Ok(FieldHandle { scene })
    }

    /// Stages the pointer in field coordinates.
    pub fn set_pointer(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.scene.renderer_mut().set_pointer(x, y).map_err(to_js)
    }

    /// Pointer left the field; points relax to rest.
    pub fn release_pointer(&mut self) -> Result<(), JsValue> {
        self.scene.renderer_mut().release_pointer().map_err(to_js)
    }

    /// Adds scroll energy; the total stays in [0, 1].
    pub fn add_impulse(&mut self, delta: f64) -> Result<(), JsValue> {
        self.scene.renderer_mut().add_impulse(delta).map_err(to_js)
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) -> Result<(), JsValue> {
        self.scene
            .renderer_mut()
            .set_reduced_motion(enabled)
            .map_err(to_js)
    }

    /// Advances by `dt` seconds and returns live positions as `[x0, y0, x1, y1, ...]`.
    pub fn tick(&mut self, dt: f64) -> Result<Float64Array, JsValue> {
        let points = self.scene.renderer_mut().tick(dt).map_err(to_js)?;
        let flat: Vec<f64> = points
            .iter()
            .flat_map(|p| [p.live().x, p.live().y])
            .collect();
        Ok(Float64Array::from(flat.as_slice()))
    }

    /// Same-category pairs as `[a0, b0, weight0, a1, b1, weight1, ...]`.
    pub fn connections(&self, max_distance: f64) -> Result<Float64Array, JsValue> {
        let pairs = self
            .scene
            .renderer()
            .connections(max_distance)
            .map_err(to_js)?;
        let flat: Vec<f64> = pairs
            .iter()
            .flat_map(|c| [c.a as f64, c.b as f64, c.weight])
            .collect();
        Ok(Float64Array::from(flat.as_slice()))
    }

    /// Rebuilds the layout for a new field size.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.scene.resize(width, height).map_err(to_js)
    }

    /// Number of points in the current layout.
    #[wasm_bindgen(getter)]
    pub fn point_count(&self) -> usize {
        self.scene.renderer().points().len()
    }

    #[wasm_bindgen(getter)]
    pub fn impulse(&self) -> f64 {
        self.scene.renderer().impulse()
    }

    /// Current parameters as a JSON object string.
    pub fn params_json(&self) -> String {
        self.scene.params().to_string()
    }

    pub fn param_schema_json(&self) -> String {
        self.scene.param_schema().to_string()
    }

    /// The current frame as a standalone SVG document.
    pub fn svg(&self) -> Result<String, JsValue> {
        let frame = self.scene.frame().map_err(to_js)?;
        Ok(to_svg_document(&frame, self.scene.size()))
    }

    /// Tears the renderer down; later calls other than `dispose` fail.
    pub fn dispose(&mut self) {
        self.scene.renderer_mut().dispose();
    }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool {
        self.scene.renderer().is_disposed()
    }
}
