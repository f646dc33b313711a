use crate::constants::{PROJECTS_BAR_ID, PROJECTS_ID, PROJECTS_INTRO_ID, PROJECT_SLIDE_SELECTOR};
use crate::dom::{self, EventListener};
use crate::frame::{self, FrameCallback, RafScheduler};
use folio_core::{
    ChoreographyParams, ContainerGeometry, IntroFrame, ScrollChoreographer, ScrollDriver,
    ScrollState, SlideFrame, Store,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The pinned projects section: intro card, stacked slides and the legacy
/// progress bar, all driven from one coalesced frame per scroll burst.
pub struct ProjectsMount {
    _driver: Rc<RefCell<ScrollDriver<RafScheduler>>>,
    callback: FrameCallback,
    _listeners: Vec<EventListener>,
    resize_observer: Option<web::ResizeObserver>,
    _resize_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

struct Presenter {
    intro: Option<web::HtmlElement>,
    slides: Vec<web::HtmlElement>,
    bar: Option<web::HtmlElement>,
}

impl Presenter {
    fn apply(&self, state: &ScrollState, intro: IntroFrame, slides: &[SlideFrame]) {
        if let Some(el) = &self.intro {
            dom::set_style(el, "opacity", &format!("{:.4}", intro.opacity));
            dom::set_style(el, "transform", &format!("scale({:.4})", intro.scale));
        }
        for frame in slides {
            // slide 0 is the intro card; project slides start at 1
            let Some(el) = self.slides.get(frame.index - 1) else {
                continue;
            };
            dom::set_style(
                el,
                "transform",
                &format!(
                    "translateY({:.3}%) scale({:.4})",
                    frame.translate_y_pct, frame.scale
                ),
            );
            dom::set_style(el, "opacity", &format!("{:.4}", frame.opacity));
        }
        if let Some(bar) = &self.bar {
            dom::set_style(
                bar,
                "opacity",
                if state.bar_visible() { "1" } else { "0" },
            );
            dom::set_style(
                bar,
                "transform",
                &format!("scaleX({:.4})", state.progress),
            );
        }
    }
}

fn measure_container(window: &web::Window, container: &web::Element) -> (ContainerGeometry, f64) {
    let rect = container.get_bounding_client_rect();
    let geometry = ContainerGeometry {
        top: dom::scroll_y(window) + rect.top(),
        height: rect.height(),
    };
    (geometry, dom::inner_height(window))
}

fn collect_slides(document: &web::Document) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(PROJECT_SLIDE_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

impl ProjectsMount {
    /// Takes the single writer of both stores for as long as the mount lives.
    pub fn mount(
        document: &web::Document,
        header: &Store<bool>,
        state: &Store<ScrollState>,
    ) -> Option<Self> {
        let window = web::window()?;
        let container = document.get_element_by_id(PROJECTS_ID)?;
        let slides = collect_slides(document);
        let params = ChoreographyParams::with_steps(slides.len() + 1);
        if let Err(e) = params.validate() {
            log::warn!("[projects] {}", e);
            return None;
        }
        let header_writer = header
            .writer()
            .map_err(|e| log::warn!("[projects] header store: {}", e))
            .ok()?;
        let state_writer = state
            .writer()
            .map_err(|e| log::warn!("[projects] scroll store: {}", e))
            .ok()?;

        let mut choreographer = ScrollChoreographer::new(params);
        let (geometry, vh) = measure_container(&window, &container);
        choreographer.measure(geometry, vh);

        let scheduler = RafScheduler::new(window.clone());
        let callback = scheduler.callback_slot();
        let driver = Rc::new(RefCell::new(ScrollDriver::new(
            choreographer,
            scheduler,
            header_writer,
            state_writer,
        )));
        let presenter = Rc::new(Presenter {
            intro: dom::html_element_by_id(document, PROJECTS_INTRO_ID),
            slides,
            bar: dom::html_element_by_id(document, PROJECTS_BAR_ID),
        });

        let present = {
            let driver = driver.clone();
            let window = window.clone();
            move |synchronous: bool| {
                let y = dom::scroll_y(&window);
                // header and rail subscribers write under this borrow; the
                // presenter writes after it ends
                let (state, intro, frames) = {
                    let mut d = driver.borrow_mut();
                    let s = if synchronous {
                        d.update_now(y)
                    } else {
                        d.on_frame(y)
                    };
                    let c = d.choreographer();
                    (s, c.intro_frame(s.progress), c.slide_frames(y))
                };
                presenter.apply(&state, intro, &frames);
            }
        };
        let present = Rc::new(present);
        {
            let present = present.clone();
            frame::install_callback(&callback, move |_| (*present)(false));
        }
        (*present)(true);

        let mut listeners = Vec::new();
        {
            let d = driver.clone();
            listeners.extend(EventListener::new(&window, "scroll", move |_| {
                d.borrow_mut().request_update()
            }));
        }
        {
            let d = driver.clone();
            let w = window.clone();
            let c = container.clone();
            listeners.extend(EventListener::new(&window, "resize", move |_| {
                let (g, vh) = measure_container(&w, &c);
                let mut d = d.borrow_mut();
                d.remeasure(g, vh);
                d.request_update();
            }));
        }

        let (resize_observer, resize_cb) = observe_resize(&window, &container, driver.clone());
        log::info!(
            "[projects] mounted steps={} top={:.0} height={:.0}",
            driver.borrow().choreographer().params().steps,
            geometry.top,
            geometry.height
        );

        Some(Self {
            _driver: driver,
            callback,
            _listeners: listeners,
            resize_observer,
            _resize_cb: resize_cb,
        })
    }
}

impl Drop for ProjectsMount {
    fn drop(&mut self) {
        if let Some(o) = self.resize_observer.take() {
            o.disconnect();
        }
        // the driver itself cancels its frame and releases the header once
        // the last handle goes away
        self.callback.borrow_mut().take();
    }
}

fn observe_resize(
    window: &web::Window,
    container: &web::Element,
    driver: Rc<RefCell<ScrollDriver<RafScheduler>>>,
) -> (
    Option<web::ResizeObserver>,
    Option<Closure<dyn FnMut(js_sys::Array)>>,
) {
    let w = window.clone();
    let c = container.clone();
    let cb = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        let (g, vh) = measure_container(&w, &c);
        let mut d = driver.borrow_mut();
        d.remeasure(g, vh);
        d.request_update();
    }) as Box<dyn FnMut(js_sys::Array)>);
    match web::ResizeObserver::new(cb.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(container);
            (Some(observer), Some(cb))
        }
        Err(e) => {
            log::warn!("[projects] ResizeObserver unavailable: {:?}", e);
            (None, None)
        }
    }
}
