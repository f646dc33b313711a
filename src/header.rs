use crate::constants::HEADER_ID;
use crate::dom;
use folio_core::{Store, Subscription};
use web_sys as web;

fn apply(el: &web::HtmlElement, visible: bool) {
    dom::set_style(
        el,
        "transform",
        if visible { "translateY(0)" } else { "translateY(-100%)" },
    );
}

/// Slide the site header in and out with the shared visibility flag.
pub fn bind(document: &web::Document, store: &Store<bool>) -> Option<Subscription<bool>> {
    let el = dom::html_element_by_id(document, HEADER_ID)?;
    apply(&el, store.get());
    Some(store.subscribe(move |visible| apply(&el, *visible)))
}
