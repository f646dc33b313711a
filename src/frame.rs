use folio_core::{FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` behind the core's scheduler trait.
///
/// The callback slot is filled after the owner is built, since the callback
/// itself needs a handle to the owner.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn callback_slot(&self) -> FrameCallback {
        self.callback.clone()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// Install `tick` as the scheduler's callback.
pub fn install_callback(slot: &FrameCallback, tick: impl FnMut(f64) + 'static) {
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(tick) as Box<dyn FnMut(f64)>));
}
