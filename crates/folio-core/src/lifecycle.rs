//! Mount/visibility/resize state machine around a `ParticleField`.
//!
//! ```text
//! Idle -> Running <-> Paused
//!   \-> Static            (reduced motion: one frame, never scheduled)
//! any -> Inert             (surface rejected the sprite atlas)
//! any -> Disposed
//! ```

use crate::field::ParticleField;
use crate::params::{FieldParams, Viewport};
use crate::schedule::{FrameCoalescer, FrameScheduler};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPhase {
    Idle,
    Running,
    Paused,
    Static,
    Inert,
    Disposed,
}

pub struct FieldController<S: FrameScheduler, D: Surface> {
    params: FieldParams,
    scheduler: S,
    surface: D,
    field: Option<ParticleField>,
    phase: FieldPhase,
    frame: FrameCoalescer,
    last_timestamp: Option<f64>,
    reduced_motion: bool,
    hidden: bool,
    offscreen: bool,
    inert: bool,
    frames_rendered: u64,
}

impl<S: FrameScheduler, D: Surface> FieldController<S, D> {
    pub fn new(params: FieldParams, scheduler: S, surface: D) -> Self {
        Self {
            params,
            scheduler,
            surface,
            field: None,
            phase: FieldPhase::Idle,
            frame: FrameCoalescer::new(),
            last_timestamp: None,
            reduced_motion: false,
            hidden: false,
            offscreen: false,
            inert: false,
            frames_rendered: 0,
        }
    }

    /// Start the effect. With no measurable viewport the controller stays
    /// `Idle` until a later `resize` supplies one.
    pub fn mount(&mut self, viewport: Option<Viewport>, reduced_motion: bool, now_ms: f64) {
        if self.phase != FieldPhase::Idle || self.inert {
            return;
        }
        self.reduced_motion = reduced_motion;
        match viewport {
            Some(vp) => self.start(vp, now_ms),
            None => log::debug!("[field] mount deferred: viewport has no size yet"),
        }
    }

    fn start(&mut self, viewport: Viewport, now_ms: f64) {
        let field = ParticleField::new(self.params.clone(), viewport, now_ms);
        if !self.install(&field) {
            return;
        }
        self.field = Some(field);
        self.last_timestamp = Some(now_ms);

        if self.reduced_motion {
            self.render_once(now_ms);
            self.phase = FieldPhase::Static;
            log::debug!("[field] reduced motion: static frame only");
            return;
        }
        self.phase = FieldPhase::Running;
        if self.should_pause() {
            self.phase = FieldPhase::Paused;
        } else {
            self.frame.schedule(&mut self.scheduler);
        }
        log::debug!("[field] mounted in {:?}", self.phase);
    }

    fn install(&mut self, field: &ParticleField) -> bool {
        self.surface.configure(field.viewport());
        match self.surface.install_sprites(field.sprites()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[field] disabling animation: {}", e);
                self.inert = true;
                self.field = None;
                self.phase = FieldPhase::Inert;
                self.frame.cancel(&mut self.scheduler);
                false
            }
        }
    }

    fn render_once(&mut self, now_ms: f64) {
        if let Some(field) = &self.field {
            field.render(&mut self.surface, now_ms);
            self.frames_rendered += 1;
        }
    }

    /// Animation-frame callback body.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.frame.take();
        if self.phase != FieldPhase::Running {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };
        let last = self.last_timestamp.unwrap_or(now_ms);
        let dt = self.params.frame_dt(last, now_ms);
        self.last_timestamp = Some(now_ms);
        field.step(dt, now_ms);
        field.render(&mut self.surface, now_ms);
        self.frames_rendered += 1;
        self.frame.schedule(&mut self.scheduler);
    }

    pub fn set_document_hidden(&mut self, hidden: bool, now_ms: f64) {
        self.hidden = hidden;
        self.sync_pause(now_ms);
    }

    pub fn set_intersecting(&mut self, intersecting: bool, now_ms: f64) {
        self.offscreen = !intersecting;
        self.sync_pause(now_ms);
    }

    #[inline]
    fn should_pause(&self) -> bool {
        self.hidden || self.offscreen
    }

    fn sync_pause(&mut self, now_ms: f64) {
        if self.inert {
            return;
        }
        match self.phase {
            FieldPhase::Running if self.should_pause() => {
                self.frame.cancel(&mut self.scheduler);
                self.phase = FieldPhase::Paused;
                log::debug!("[field] paused");
            }
            FieldPhase::Paused if !self.should_pause() => {
                // restart the clock so the first delta after a stall stays small
                self.last_timestamp = Some(now_ms);
                self.phase = FieldPhase::Running;
                self.frame.schedule(&mut self.scheduler);
                log::debug!("[field] resumed");
            }
            _ => {}
        }
    }

    /// Full rebuild for new dimensions; resumes in whatever phase applies.
    pub fn resize(&mut self, viewport: Option<Viewport>, now_ms: f64) {
        if self.inert {
            return;
        }
        match self.phase {
            FieldPhase::Disposed | FieldPhase::Inert => {}
            FieldPhase::Idle => {
                if let Some(vp) = viewport {
                    self.start(vp, now_ms);
                }
            }
            FieldPhase::Running | FieldPhase::Paused | FieldPhase::Static => {
                let Some(vp) = viewport else {
                    return;
                };
                let Some(mut field) = self.field.take() else {
                    return;
                };
                field.rebuild(vp);
                if !self.install(&field) {
                    return;
                }
                self.field = Some(field);
                if self.phase == FieldPhase::Static {
                    // resizing clears the backing store
                    self.render_once(now_ms);
                }
            }
        }
    }

    pub fn dispose(&mut self) {
        self.frame.cancel(&mut self.scheduler);
        self.phase = FieldPhase::Disposed;
        log::debug!("[field] disposed");
    }

    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}
