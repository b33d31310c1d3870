use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let w = web::window()?;
    let d = w.document()?;
    Some((w, d))
}

/// `prefers-reduced-motion: reduce` as reported by the browser.
pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// An event listener that stays registered until [`Listener::remove`].
///
/// Owns its closure, so removing (or dropping) the listener is the only way
/// the callback goes away.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    /// Registers `handler` as a passive listener for `event` on `target`.
    pub fn add(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[dom] could not add {event} listener: {e:?}");
        }
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    pub fn remove(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// A `ResizeObserver` on one element, alive until [`ResizeWatch::disconnect`].
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
    /// Calls `handler` whenever `element`'s box changes size.
    pub fn observe(
        element: &web::Element,
        mut handler: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |_entries: js_sys::Array| handler())
            as Box<dyn FnMut(js_sys::Array)>);
        let observer = web::ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(element);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Stops observing and drops the callback.
    pub fn disconnect(self) {
        self.observer.disconnect();
    }
}

/// Canvas backing size matched to its parent's CSS box; returns the CSS size.
pub fn sync_canvas_to_parent(canvas: &web::HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas
        .parent_element()
        .map(|p| p.get_bounding_client_rect())
        .unwrap_or_else(|| canvas.get_bounding_client_rect());
    let (w, h) = (rect.width().max(1.0), rect.height().max(1.0));
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    (w, h)
}
