#![cfg(target_arch = "wasm32")]
use crate::background::BackgroundMount;
use crate::constants::{BACKGROUND_CANVAS_SELECTOR, BACKGROUND_ROOT_ID, PROJECT_SLIDE_SELECTOR};
use crate::nav::NavMount;
use crate::projects::ProjectsMount;
use folio_core::{ScrollState, Store, Subscription};
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod background;
mod constants;
mod dom;
mod frame;
mod header;
mod nav;
mod projects;
mod rail;
mod surface;

/// Everything mounted on the page; dropping it detaches all of it.
#[derive(Default)]
struct App {
    background: Option<BackgroundMount>,
    projects: Option<ProjectsMount>,
    nav: Option<NavMount>,
    header: Option<Subscription<bool>>,
    rail: Option<Subscription<ScrollState>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn background_parts(
    document: &web::Document,
    root_id: &str,
) -> anyhow::Result<(web::Element, web::HtmlCanvasElement)> {
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", root_id))?;
    let canvas = root
        .query_selector(BACKGROUND_CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("#{} has no canvas", root_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok((root, canvas))
}

/// A particle background mounted by the host page. Call `dispose` on
/// unmount; dropping the handle does the same.
#[wasm_bindgen]
pub struct BackgroundHandle {
    inner: Option<BackgroundMount>,
}

#[wasm_bindgen]
impl BackgroundHandle {
    pub fn dispose(&mut self) {
        if let Some(mut m) = self.inner.take() {
            m.dispose();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.inner
            .as_ref()
            .map(|m| format!("{:?}", m.phase()))
            .unwrap_or_else(|| "Disposed".to_string())
    }
}

/// Mount a particle field into the element `root_id`, which must hold a
/// canvas. Resolves to `undefined` when the canvas has no 2D context.
#[wasm_bindgen]
pub fn mount_background(root_id: &str) -> Result<Option<BackgroundHandle>, JsValue> {
    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    let (root, canvas) =
        background_parts(&document, root_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(BackgroundMount::mount(root, canvas).map(|m| BackgroundHandle { inner: Some(m) }))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut app = App::default();

    // every section is optional: pages mount whatever markup they carry
    match background_parts(&document, BACKGROUND_ROOT_ID) {
        Ok((root, canvas)) => app.background = BackgroundMount::mount(root, canvas),
        Err(e) => log::info!("[background] not mounted: {}", e),
    }

    let header_visible = Store::new(true);
    let scroll_state = Store::new(ScrollState::default());
    app.header = header::bind(&document, &header_visible);
    let total_slides = document
        .query_selector_all(PROJECT_SLIDE_SELECTOR)
        .map(|l| l.length() as usize + 1)
        .unwrap_or(1);
    app.rail = rail::bind(&document, &scroll_state, total_slides);
    app.projects = ProjectsMount::mount(&document, &header_visible, &scroll_state);
    app.nav = NavMount::mount(&document);

    log::info!(
        "mounted background={} projects={} nav={} header={} rail={}",
        app.background.is_some(),
        app.projects.is_some(),
        app.nav.is_some(),
        app.header.is_some(),
        app.rail.is_some()
    );
    APP.with(|cell| *cell.borrow_mut() = Some(app));
    Ok(())
}

/// Detach everything `start` mounted.
#[wasm_bindgen]
pub fn shutdown() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().take() {
            drop(app);
            log::info!("folio-web shut down");
        }
    });
}
