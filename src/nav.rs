use crate::constants::{NAV_ID, NAV_ITEM_SELECTOR, NAV_NEXT_SELECTOR, NAV_PREV_SELECTOR};
use crate::dom::{self, EventListener};
use crate::frame::{self, FrameCallback, RafScheduler};
use folio_core::{
    is_activation_key, Direction, FrameCoalescer, NavParams, Section, SectionLocator, SectionNav,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Looks sections up by id, caching hits. Misses are retried on the next
/// lookup since sections may render late.
struct DomSectionLocator {
    document: web::Document,
    cache: Vec<(String, web::Element)>,
}

impl DomSectionLocator {
    fn element(&mut self, id: &str) -> Option<web::Element> {
        if let Some((_, el)) = self.cache.iter().find(|(k, _)| k == id) {
            if el.is_connected() {
                return Some(el.clone());
            }
        }
        self.cache.retain(|(k, _)| k != id);
        let el = self.document.get_element_by_id(id)?;
        self.cache.push((id.to_string(), el.clone()));
        Some(el)
    }
}

impl SectionLocator for DomSectionLocator {
    fn viewport_top(&mut self, id: &str) -> Option<f64> {
        self.element(id).map(|el| el.get_bounding_client_rect().top())
    }
}

struct NavState {
    nav: SectionNav,
    locator: DomSectionLocator,
    active: usize,
    frame: FrameCoalescer,
    scheduler: RafScheduler,
    root: web::HtmlElement,
    items: Vec<web::Element>,
}

impl NavState {
    fn refresh(&mut self) {
        self.frame.take();
        let active = self.nav.pick_active(&mut self.locator);
        if active != self.active {
            log::debug!("[nav] active {} -> {}", self.active, active);
        }
        self.active = active;
        for (i, item) in self.items.iter().enumerate() {
            if i == active {
                _ = item.set_attribute("data-active", "1");
            } else {
                _ = item.remove_attribute("data-active");
            }
        }
        if self.nav.is_dark_overlay(active) {
            _ = self.root.set_attribute("data-dark", "1");
        } else {
            _ = self.root.remove_attribute("data-dark");
        }
    }

    fn jump(&mut self, dir: Direction) -> Option<f64> {
        let y = web::window().map(|w| dom::scroll_y(&w)).unwrap_or(0.0);
        self.nav.jump(self.active, dir, y, &mut self.locator)
    }

    fn target_of(&mut self, id: &str) -> Option<f64> {
        let y = web::window().map(|w| dom::scroll_y(&w)).unwrap_or(0.0);
        self.nav.scroll_to_id(id, y, &mut self.locator)
    }
}

fn smooth_scroll(top: f64) {
    let Some(window) = web::window() else {
        return;
    };
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

/// Side timeline: scroll-spy highlighting plus prev/next and direct jumps.
pub struct NavMount {
    state: Rc<RefCell<NavState>>,
    callback: FrameCallback,
    _listeners: Vec<EventListener>,
}

impl NavMount {
    pub fn mount(document: &web::Document) -> Option<Self> {
        let window = web::window()?;
        let root = dom::html_element_by_id(document, NAV_ID)?;
        let list = root.query_selector_all(NAV_ITEM_SELECTOR).ok()?;
        let items: Vec<web::Element> = (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .collect();
        let sections: Vec<Section> = items
            .iter()
            .filter_map(|el| {
                let id = el.get_attribute("data-section")?;
                let label = el.text_content().unwrap_or_default();
                Some(Section::new(id, label.trim()))
            })
            .collect();
        let offset = root.get_attribute("data-offset");
        let mut params = NavParams {
            offset_px: NavParams::offset_from_attr(offset.as_deref()),
            ..NavParams::default()
        };
        if let Some(id) = root.get_attribute("data-dark-from") {
            params.dark_section_id = Some(id);
        }
        let nav = match SectionNav::try_new(sections, params) {
            Ok(nav) => nav,
            Err(e) => {
                log::warn!("[nav] #{}: {}", NAV_ID, e);
                return None;
            }
        };
        let scheduler = RafScheduler::new(window.clone());
        let callback = scheduler.callback_slot();
        let state = Rc::new(RefCell::new(NavState {
            nav,
            locator: DomSectionLocator {
                document: document.clone(),
                cache: Vec::new(),
            },
            active: 0,
            frame: FrameCoalescer::new(),
            scheduler,
            root: root.clone(),
            items: items.clone(),
        }));
        {
            let s = state.clone();
            frame::install_callback(&callback, move |_| s.borrow_mut().refresh());
        }
        state.borrow_mut().refresh();

        let mut listeners = Vec::new();
        for event in ["scroll", "resize"] {
            let s = state.clone();
            listeners.extend(EventListener::new(&window, event, move |_| {
                let mut guard = s.borrow_mut();
                let st = &mut *guard;
                st.frame.schedule(&mut st.scheduler);
            }));
        }
        for (selector, dir) in [
            (NAV_PREV_SELECTOR, Direction::Prev),
            (NAV_NEXT_SELECTOR, Direction::Next),
        ] {
            let Some(button) = root.query_selector(selector).ok().flatten() else {
                continue;
            };
            let s = state.clone();
            listeners.extend(EventListener::new(&button, "click", move |_| {
                let target = s.borrow_mut().jump(dir);
                if let Some(top) = target {
                    smooth_scroll(top);
                }
            }));
        }
        for item in &items {
            let Some(id) = item.get_attribute("data-section") else {
                continue;
            };
            let s = state.clone();
            let click_id = id.clone();
            listeners.extend(EventListener::new(item, "click", move |_| {
                let target = s.borrow_mut().target_of(&click_id);
                if let Some(top) = target {
                    smooth_scroll(top);
                }
            }));
            let s = state.clone();
            listeners.extend(EventListener::new(item, "keydown", move |ev| {
                let Some(key_ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
                    return;
                };
                if !is_activation_key(&key_ev.key()) {
                    return;
                }
                let target = s.borrow_mut().target_of(&id);
                if let Some(top) = target {
                    smooth_scroll(top);
                }
            }));
        }

        log::info!(
            "[nav] mounted sections={} offset={}",
            state.borrow().nav.sections().len(),
            state.borrow().nav.params().offset_px
        );
        Some(Self {
            state,
            callback,
            _listeners: listeners,
        })
    }
}

impl Drop for NavMount {
    fn drop(&mut self) {
        let mut guard = self.state.borrow_mut();
        let st = &mut *guard;
        st.frame.cancel(&mut st.scheduler);
        drop(guard);
        self.callback.borrow_mut().take();
    }
}
