use crate::dom::{self, EventListener};
use crate::frame::{self, FrameCallback, RafScheduler};
use crate::surface::CanvasSurface;
use folio_core::{FieldController, FieldParams, FieldPhase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Controller = FieldController<RafScheduler, CanvasSurface>;

/// A mounted particle field and everything attached to the page for it.
pub struct BackgroundMount {
    controller: Rc<RefCell<Controller>>,
    callback: FrameCallback,
    listeners: Vec<EventListener>,
    observer: Option<web::IntersectionObserver>,
    _observer_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

impl BackgroundMount {
    /// `None` when the canvas has no 2D context: the CSS background layers
    /// stay and nothing animates.
    pub fn mount(root: web::Element, canvas: web::HtmlCanvasElement) -> Option<Self> {
        let window = web::window()?;
        let document = window.document()?;
        let params = FieldParams::default();
        if let Err(e) = params.validate() {
            log::warn!("[background] {}", e);
            return None;
        }
        let surface = match CanvasSurface::acquire(canvas) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[background] {}; keeping static background", e);
                return None;
            }
        };

        let scheduler = RafScheduler::new(window.clone());
        let callback = scheduler.callback_slot();
        let controller = Rc::new(RefCell::new(FieldController::new(
            params.clone(),
            scheduler,
            surface,
        )));
        {
            let c = controller.clone();
            frame::install_callback(&callback, move |now| c.borrow_mut().on_frame(now));
        }

        let reduced = dom::prefers_reduced_motion(&window);
        let now = instant::now();
        {
            let mut c = controller.borrow_mut();
            c.mount(dom::measure_viewport(&root, params.dpr_cap), reduced, now);
            c.set_document_hidden(document.hidden(), now);
        }
        log::info!(
            "[background] mounted phase={:?} reduced_motion={}",
            controller.borrow().phase(),
            reduced
        );

        let mut listeners = Vec::new();
        {
            let c = controller.clone();
            let root = root.clone();
            let cap = params.dpr_cap;
            listeners.extend(EventListener::new(&window, "resize", move |_| {
                c.borrow_mut()
                    .resize(dom::measure_viewport(&root, cap), instant::now());
            }));
        }
        {
            let c = controller.clone();
            let doc = document.clone();
            listeners.extend(EventListener::new(&document, "visibilitychange", move |_| {
                c.borrow_mut()
                    .set_document_hidden(doc.hidden(), instant::now());
            }));
        }

        let (observer, observer_cb) = observe_intersection(&root, controller.clone());

        Some(Self {
            controller,
            callback,
            listeners,
            observer,
            _observer_cb: observer_cb,
        })
    }

    pub fn phase(&self) -> FieldPhase {
        self.controller.borrow().phase()
    }

    pub fn dispose(&mut self) {
        self.controller.borrow_mut().dispose();
        if let Some(o) = self.observer.take() {
            o.disconnect();
        }
        self.listeners.clear();
        // breaks the callback -> controller -> scheduler -> callback cycle
        self.callback.borrow_mut().take();
    }
}

impl Drop for BackgroundMount {
    fn drop(&mut self) {
        if self.phase() != FieldPhase::Disposed {
            self.dispose();
        }
    }
}

fn observe_intersection(
    root: &web::Element,
    controller: Rc<RefCell<Controller>>,
) -> (
    Option<web::IntersectionObserver>,
    Option<Closure<dyn FnMut(js_sys::Array)>>,
) {
    let cb = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let now = instant::now();
        for entry in entries.iter() {
            if let Ok(e) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                controller
                    .borrow_mut()
                    .set_intersecting(e.is_intersecting(), now);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);
    match web::IntersectionObserver::new(cb.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(root);
            (Some(observer), Some(cb))
        }
        Err(e) => {
            // no observer support: the field simply never pauses off-screen
            log::warn!("[background] IntersectionObserver unavailable: {:?}", e);
            (None, None)
        }
    }
}
