// Deterministic stand-ins for the browser capabilities the core depends on.

#![allow(dead_code)]
use folio_core::{
    Blend, FrameHandle, FrameScheduler, SectionLocator, SpriteKey, SpriteTable, Surface,
    SurfaceError, Viewport,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct SchedulerLog {
    next_id: i32,
    pub pending: Vec<FrameHandle>,
    pub requests: usize,
    pub cancels: usize,
    pub refuse: bool,
}

/// Frame scheduler that only records. Clones share one log, so a test can
/// keep a handle after moving the scheduler into its owner.
#[derive(Clone, Debug, Default)]
pub struct FakeScheduler {
    log: Rc<RefCell<SchedulerLog>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        let s = Self::default();
        s.log.borrow_mut().refuse = true;
        s
    }

    pub fn requests(&self) -> usize {
        self.log.borrow().requests
    }

    pub fn cancels(&self) -> usize {
        self.log.borrow().cancels
    }

    pub fn pending(&self) -> usize {
        self.log.borrow().pending.len()
    }
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let mut log = self.log.borrow_mut();
        log.requests += 1;
        if log.refuse {
            return None;
        }
        log.next_id += 1;
        let h = FrameHandle(log.next_id);
        log.pending.push(h);
        Some(h)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut log = self.log.borrow_mut();
        log.cancels += 1;
        log.pending.retain(|h| *h != handle);
    }
}

/// Surface that counts calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub configured: Vec<Viewport>,
    pub installs: usize,
    pub clears: usize,
    pub blends: Vec<Blend>,
    pub draws: Vec<(SpriteKey, f32)>,
    /// Installs succeed until this many have gone through, then fail.
    pub fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    pub fn failing_after(installs: usize) -> Self {
        Self {
            fail_after: Some(installs),
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn configure(&mut self, viewport: &Viewport) {
        self.configured.push(*viewport);
    }

    fn install_sprites(&mut self, _sprites: &SpriteTable) -> Result<(), SurfaceError> {
        if self.fail_after.is_some_and(|n| self.installs >= n) {
            return Err(SurfaceError::ContextUnavailable);
        }
        self.installs += 1;
        Ok(())
    }

    fn clear(&mut self, _viewport: &Viewport) {
        self.clears += 1;
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blends.push(blend);
    }

    fn draw_sprite(&mut self, key: SpriteKey, _x: f32, _y: f32, alpha: f32) {
        self.draws.push((key, alpha));
    }
}

/// Section tops keyed by id; absent ids behave like missing elements.
#[derive(Debug, Default)]
pub struct FakeLocator {
    pub tops: HashMap<String, f64>,
    pub lookups: usize,
}

impl FakeLocator {
    pub fn with(tops: &[(&str, f64)]) -> Self {
        Self {
            tops: tops.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            lookups: 0,
        }
    }
}

impl SectionLocator for FakeLocator {
    fn viewport_top(&mut self, id: &str) -> Option<f64> {
        self.lookups += 1;
        self.tops.get(id).copied()
    }
}

pub fn viewport(width: f64, height: f64) -> Viewport {
    Viewport::measure(width, height, 1.0, 2.0).expect("non-empty viewport")
}

pub fn desktop() -> Viewport {
    viewport(1280.0, 720.0)
}

pub fn mobile() -> Viewport {
    viewport(390.0, 844.0)
}
