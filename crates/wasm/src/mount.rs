//! Browser wiring for the scenes: listeners, the frame loop, drawing, teardown.
//!
//! Every callback holds a `Weak` reference to the mount state, and
//! `Mount::dispose` removes all listeners, cancels the pending frame and
//! disposes the renderer in one go, so no callback can reach a torn-down scene.

use crate::dom::{self, Listener, ResizeWatch, SVG_NS};
use fieldfx_core::{normalize_viewport, DVec2, ScrollTracker};
use fieldfx_scenes::frame::{polyline_points, Frame, NodeMark};
use fieldfx_scenes::{Scene, SceneKind};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Longest frame gap fed to `tick`; larger gaps (background tabs) are capped.
const MAX_FRAME_DT: f64 = 0.1;
const HERO_FIELD: DVec2 = DVec2::new(100.0, 60.0);

enum Surface {
    Svg {
        polylines: Vec<web::Element>,
        accent: web::Element,
    },
    Canvas {
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
    },
}

struct MountState {
    scene: RefCell<SceneKind>,
    surface: Surface,
    listeners: RefCell<Vec<Listener>>,
    resize_watch: RefCell<Option<ResizeWatch>>,
    frame_cb: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    raf_id: Cell<Option<i32>>,
    last_ts: Cell<Option<f64>>,
    disposed: Cell<bool>,
}

impl MountState {
    fn on_frame(&self, ts: f64) {
        if self.disposed.get() {
            return;
        }
        let dt = self
            .last_ts
            .get()
            .map(|last| ((ts - last) / 1000.0).clamp(0.0, MAX_FRAME_DT))
            .unwrap_or(0.0);
        self.last_ts.set(Some(ts));

        let frame = {
            let mut scene = self.scene.borrow_mut();
            if let Err(e) = scene.renderer_mut().tick(dt) {
                log::error!("[frame] tick failed: {e}");
                return;
            }
            match scene.frame() {
                Ok(f) => f,
                Err(e) => {
                    log::error!("[frame] frame failed: {e}");
                    return;
                }
            }
        };
        self.draw(&frame);
        self.request_frame();
    }

    fn request_frame(&self) {
        let Some(w) = web::window() else { return };
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.raf_id.set(Some(id)),
                Err(e) => log::error!("[frame] requestAnimationFrame failed: {e:?}"),
            }
        }
    }

    fn draw(&self, frame: &Frame) {
        match &self.surface {
            Surface::Svg { polylines, accent } => draw_svg(frame, polylines, accent),
            Surface::Canvas { canvas, ctx } => draw_canvas(frame, canvas, ctx),
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            let _ = w.cancel_animation_frame(id);
        }
        for l in self.listeners.borrow_mut().drain(..) {
            l.remove();
        }
        if let Some(watch) = self.resize_watch.borrow_mut().take() {
            watch.disconnect();
        }
        self.frame_cb.borrow_mut().take();
        self.scene.borrow_mut().renderer_mut().dispose();
        log::info!("[mount] disposed");
    }
}

/// A live effect attached to the page. Call `dispose()` to detach it.
#[wasm_bindgen]
pub struct Mount {
    state: Rc<MountState>,
}

#[wasm_bindgen]
impl Mount {
    /// Stops the frame loop, removes every listener and disposes the
    /// renderer. Safe to call more than once.
    pub fn dispose(&self) {
        self.state.dispose();
    }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool {
        self.state.disposed.get()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.state.dispose();
    }
}

fn start(state: Rc<MountState>, window: &web::Window) {
    if dom::prefers_reduced_motion(window) {
        let _ = state
            .scene
            .borrow_mut()
            .renderer_mut()
            .set_reduced_motion(true);
        log::info!("[mount] reduced motion requested; displacement disabled");
    }
    let weak: Weak<MountState> = Rc::downgrade(&state);
    *state.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if let Some(s) = weak.upgrade() {
            s.on_frame(ts);
        }
    }) as Box<dyn FnMut(f64)>));
    state.request_frame();
}

fn with_state(weak: &Weak<MountState>, f: impl FnOnce(&MountState)) {
    if let Some(s) = weak.upgrade() {
        if !s.disposed.get() {
            f(&s);
        }
    }
}

/// Mounts the cursor-reactive SVG grid into the element `container_id`.
#[wasm_bindgen]
pub fn mount_hero_grid(container_id: &str) -> Result<Mount, JsValue> {
    let (window, document) =
        dom::window_document().ok_or_else(|| JsValue::from_str("no window/document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{container_id}")))?;

    let scene = SceneKind::from_name("hero-grid", HERO_FIELD.x, HERO_FIELD.y, 0, &json!({}))
        .map_err(crate::to_js)?;

    let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("viewBox", &format!("0 0 {} {}", HERO_FIELD.x, HERO_FIELD.y))?;
    svg.set_attribute("preserveAspectRatio", "xMidYMid slice")?;
    svg.set_attribute("style", "width:100%;height:100%;position:absolute;inset:0;")?;
    container.append_child(&svg)?;

    let template = scene.frame().map_err(crate::to_js)?;
    let mut polylines = Vec::with_capacity(template.polylines.len());
    for line in &template.polylines {
        let el = document.create_element_ns(Some(SVG_NS), "polyline")?;
        el.set_attribute("fill", "none")?;
        el.set_attribute("stroke", &line.stroke)?;
        el.set_attribute("stroke-width", &line.stroke_width.to_string())?;
        svg.append_child(&el)?;
        polylines.push(el);
    }
    let accent = document.create_element_ns(Some(SVG_NS), "circle")?;
    accent.set_attribute("r", "0.6")?;
    accent.set_attribute("fill", "rgba(200,255,0,0.5)")?;
    svg.append_child(&accent)?;

    let state = Rc::new(MountState {
        scene: RefCell::new(scene),
        surface: Surface::Svg { polylines, accent },
        listeners: RefCell::new(Vec::new()),
        resize_watch: RefCell::new(None),
        frame_cb: RefCell::new(None),
        raf_id: Cell::new(None),
        last_ts: Cell::new(None),
        disposed: Cell::new(false),
    });

    let target: &web::EventTarget = window.as_ref();
    let weak = Rc::downgrade(&state);
    let w = window.clone();
    let mousemove = Listener::add(target, "mousemove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else { return };
        let viewport = DVec2::new(
            w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
        );
        let client = DVec2::new(ev.client_x() as f64, ev.client_y() as f64);
        let p = normalize_viewport(client, viewport, HERO_FIELD);
        with_state(&weak, |s| {
            let _ = s.scene.borrow_mut().renderer_mut().set_pointer(p.x, p.y);
        });
    });

    let weak = Rc::downgrade(&state);
    let w = window.clone();
    let mut tracker = ScrollTracker::new();
    tracker.observe(w.scroll_y().unwrap_or(0.0));
    let scroll = Listener::add(target, "scroll", move |_| {
        let impulse = tracker.observe(w.scroll_y().unwrap_or(0.0));
        with_state(&weak, |s| {
            let _ = s.scene.borrow_mut().renderer_mut().add_impulse(impulse);
        });
    });

    state.listeners.borrow_mut().extend([mousemove, scroll]);
    start(state.clone(), &window);
    log::info!("[mount] hero grid attached to #{container_id}");
    Ok(Mount { state })
}

/// Mounts the floating skills node graph onto the canvas `canvas_id`.
#[wasm_bindgen]
pub fn mount_skills_graph(canvas_id: &str, seed: u32) -> Result<Mount, JsValue> {
    let (window, document) =
        dom::window_document().ok_or_else(|| JsValue::from_str("no window/document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{canvas_id}")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;

    let (width, height) = dom::sync_canvas_to_parent(&canvas);
    let scene = SceneKind::from_name("skills-graph", width, height, seed as u64, &json!({}))
        .map_err(crate::to_js)?;

    let state = Rc::new(MountState {
        scene: RefCell::new(scene),
        surface: Surface::Canvas {
            canvas: canvas.clone(),
            ctx,
        },
        listeners: RefCell::new(Vec::new()),
        resize_watch: RefCell::new(None),
        frame_cb: RefCell::new(None),
        raf_id: Cell::new(None),
        last_ts: Cell::new(None),
        disposed: Cell::new(false),
    });

    let canvas_target: &web::EventTarget = canvas.as_ref();
    let weak = Rc::downgrade(&state);
    let c = canvas.clone();
    let mousemove = Listener::add(canvas_target, "mousemove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else { return };
        let rect = c.get_bounding_client_rect();
        let x = ev.client_x() as f64 - rect.left();
        let y = ev.client_y() as f64 - rect.top();
        with_state(&weak, |s| {
            let _ = s.scene.borrow_mut().renderer_mut().set_pointer(x, y);
        });
    });

    let weak = Rc::downgrade(&state);
    let mouseleave = Listener::add(canvas_target, "mouseleave", move |_| {
        with_state(&weak, |s| {
            let _ = s.scene.borrow_mut().renderer_mut().release_pointer();
        });
    });

    state
        .listeners
        .borrow_mut()
        .extend([mousemove, mouseleave]);

    // the container can change size without the window doing so
    let watch = canvas.parent_element().and_then(|parent| {
        let weak = Rc::downgrade(&state);
        let c = canvas.clone();
        ResizeWatch::observe(&parent, move || resize_to_parent(&weak, &c))
            .map_err(|e| log::warn!("[resize] ResizeObserver unavailable: {e:?}"))
            .ok()
    });
    match watch {
        Some(w) => *state.resize_watch.borrow_mut() = Some(w),
        None => {
            let weak = Rc::downgrade(&state);
            let c = canvas.clone();
            let resize =
                Listener::add(window.as_ref(), "resize", move |_| resize_to_parent(&weak, &c));
            state.listeners.borrow_mut().push(resize);
        }
    }
    start(state.clone(), &window);
    log::info!("[mount] skills graph attached to #{canvas_id}");
    Ok(Mount { state })
}

fn resize_to_parent(weak: &Weak<MountState>, canvas: &web::HtmlCanvasElement) {
    with_state(weak, |s| {
        let (w, h) = dom::sync_canvas_to_parent(canvas);
        let mut scene = s.scene.borrow_mut();
        if scene.size() == DVec2::new(w, h) {
            return;
        }
        if let Err(e) = scene.resize(w, h) {
            log::warn!("[resize] skills graph: {e}");
        }
    });
}

fn draw_svg(frame: &Frame, polylines: &[web::Element], accent: &web::Element) {
    for (el, line) in polylines.iter().zip(&frame.polylines) {
        let _ = el.set_attribute("points", &polyline_points(&line.points));
    }
    match frame.dots.first() {
        Some(dot) => {
            let _ = accent.set_attribute("cx", &format!("{:.2}", dot.center.x));
            let _ = accent.set_attribute("cy", &format!("{:.2}", dot.center.y));
            let _ = accent.set_attribute("visibility", "visible");
        }
        None => {
            let _ = accent.set_attribute("visibility", "hidden");
        }
    }
}

fn draw_canvas(
    frame: &Frame,
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for seg in &frame.segments {
        ctx.begin_path();
        ctx.move_to(seg.from.x, seg.from.y);
        ctx.line_to(seg.to.x, seg.to.y);
        ctx.set_stroke_style_str(&seg.stroke);
        ctx.set_line_width(seg.stroke_width);
        ctx.stroke();
    }
    for node in &frame.nodes {
        draw_node(ctx, node);
    }
}

fn draw_node(ctx: &web::CanvasRenderingContext2d, node: &NodeMark) {
    const PILL_HEIGHT: f64 = 14.0;
    const CORNER: f64 = 6.0;
    let (x, y) = (node.center.x - node.half_width, node.center.y - PILL_HEIGHT / 2.0);
    let (w, h, r) = (node.half_width * 2.0, PILL_HEIGHT, CORNER);

    ctx.save();
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
    ctx.set_fill_style_str(&node.fill);
    ctx.fill();
    ctx.set_stroke_style_str(&node.stroke);
    ctx.set_line_width(if node.hover { 1.2 } else { 0.6 });
    ctx.stroke();
    ctx.restore();

    ctx.save();
    ctx.set_font(if node.hover {
        "500 10px \"JetBrains Mono\", monospace"
    } else {
        "300 10px \"JetBrains Mono\", monospace"
    });
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(&node.label_fill);
    let _ = ctx.fill_text(&node.label, node.center.x, node.center.y);
    ctx.restore();
}
