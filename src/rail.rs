use crate::constants::{
    RAIL_DOTS_SELECTOR, RAIL_FILL_SELECTOR, RAIL_ID, RAIL_LABEL_SELECTOR, RAIL_MOBILE_BREAKPOINT,
};
use crate::dom;
use folio_core::{RailView, ScrollState, Store, Subscription};
use std::fmt::Write;
use wasm_bindgen::JsCast;
use web_sys as web;

struct RailElements {
    root: web::HtmlElement,
    fill: Option<web::HtmlElement>,
    label: Option<web::HtmlElement>,
    dots: Option<web::HtmlElement>,
}

fn child(root: &web::HtmlElement, selector: &str) -> Option<web::HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

fn is_mobile() -> bool {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .is_some_and(|w| w < RAIL_MOBILE_BREAKPOINT)
}

impl RailElements {
    fn render(&self, view: Option<&RailView>) {
        let Some(view) = view else {
            dom::set_style(&self.root, "display", "none");
            return;
        };
        dom::set_style(&self.root, "display", "");
        let mobile = is_mobile();
        let (axis, pos) = if mobile {
            ("width", "left")
        } else {
            ("height", "top")
        };
        if let Some(fill) = &self.fill {
            dom::set_style(fill, axis, &format!("{:.3}%", view.fill * 100.0));
        }
        if let Some(label) = &self.label {
            let text: &str = if mobile {
                &view.label_mobile
            } else {
                &view.label_desktop
            };
            label.set_text_content(Some(text));
        }
        if let Some(dots) = &self.dots {
            let mut html = String::new();
            for dot in &view.dots {
                _ = write!(
                    html,
                    r#"<span class="rail-dot" data-project="{}" data-active="{}" style="{}:{:.3}%"></span>"#,
                    dot.project,
                    u8::from(dot.active),
                    pos,
                    dot.position * 100.0
                );
            }
            dots.set_inner_html(&html);
        }
    }
}

/// Render the vertical (horizontal on narrow screens) project rail from the
/// shared scroll state.
pub fn bind(
    document: &web::Document,
    store: &Store<ScrollState>,
    total_slides: usize,
) -> Option<Subscription<ScrollState>> {
    let root = dom::html_element_by_id(document, RAIL_ID)?;
    let elements = RailElements {
        fill: child(&root, RAIL_FILL_SELECTOR),
        label: child(&root, RAIL_LABEL_SELECTOR),
        dots: child(&root, RAIL_DOTS_SELECTOR),
        root,
    };
    let s = store.get();
    elements.render(RailView::compute(s.progress, s.active_index, total_slides).as_ref());
    Some(store.subscribe(move |s| {
        elements.render(RailView::compute(s.progress, s.active_index, total_slides).as_ref())
    }))
}
