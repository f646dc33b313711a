//! Scroll position to section progress mapping for the cinematic projects
//! section.

use crate::constants::*;
use crate::error::ConfigError;
use crate::schedule::{FrameCoalescer, FrameScheduler};
use crate::store::StoreWriter;

/// Absolute document geometry of the scrolling container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    pub top: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChoreographyParams {
    /// Viewport-high steps including the intro slide.
    pub steps: usize,
    /// Slack in px when deciding whether the viewport is inside the section.
    pub inside_buffer: f64,
}

impl Default for ChoreographyParams {
    fn default() -> Self {
        Self {
            steps: 4,
            inside_buffer: INSIDE_BUFFER_PX,
        }
    }
}

impl ChoreographyParams {
    pub fn with_steps(steps: usize) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        Ok(())
    }
}

/// Derived per-update output. Always clamped to valid ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub progress: f64,
    pub active_index: usize,
    pub inside: bool,
}

impl ScrollState {
    #[inline]
    pub fn header_visible(&self) -> bool {
        !self.inside
    }

    /// The intro step never shows the rail.
    #[inline]
    pub fn rail_visible(&self) -> bool {
        self.active_index > 0
    }

    #[inline]
    pub fn bar_visible(&self) -> bool {
        self.progress > 0.0 && self.progress < 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroFrame {
    pub opacity: f64,
    pub scale: f64,
}

/// Transform of one project slide (1-based index; 0 is the intro).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideFrame {
    pub index: usize,
    /// Vertical offset in percent of the slide height while it slides in.
    pub translate_y_pct: f64,
    pub scale: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct ScrollChoreographer {
    params: ChoreographyParams,
    geometry: Option<ContainerGeometry>,
    viewport_height: f64,
}

impl ScrollChoreographer {
    pub fn new(params: ChoreographyParams) -> Self {
        Self {
            params,
            geometry: None,
            viewport_height: 0.0,
        }
    }

    /// Cache container geometry until the next invalidation.
    pub fn measure(&mut self, geometry: ContainerGeometry, viewport_height: f64) {
        self.geometry = Some(geometry);
        self.viewport_height = if viewport_height.is_finite() {
            viewport_height.max(0.0)
        } else {
            0.0
        };
    }

    pub fn invalidate(&mut self) {
        self.geometry = None;
    }

    pub fn is_measured(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn params(&self) -> &ChoreographyParams {
        &self.params
    }

    #[inline]
    fn last_step(&self) -> usize {
        self.params.steps.saturating_sub(1)
    }

    fn span(&self) -> f64 {
        self.last_step() as f64 * self.viewport_height
    }

    /// Scroll distance travelled inside the section, in `[0, span]`.
    pub fn local_offset(&self, scroll_y: f64) -> f64 {
        let Some(g) = self.geometry else {
            return 0.0;
        };
        let raw = scroll_y - g.top;
        if !raw.is_finite() {
            return 0.0;
        }
        raw.clamp(0.0, self.span())
    }

    pub fn sample(&self, scroll_y: f64) -> ScrollState {
        let Some(g) = self.geometry else {
            return ScrollState::default();
        };
        let vh = self.viewport_height;
        let span = self.span();
        let local = self.local_offset(scroll_y);

        let progress = if span > 0.0 {
            (local / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let active_index = if vh > 0.0 {
            ((local / vh).floor() as usize).min(self.last_step())
        } else {
            0
        };
        let top = g.top - scroll_y;
        let buffer = self.params.inside_buffer;
        let inside = top <= buffer && top > -(g.height - vh - buffer);

        ScrollState {
            progress,
            active_index,
            inside,
        }
    }

    pub fn intro_frame(&self, progress: f64) -> IntroFrame {
        let fade = (progress.clamp(0.0, 1.0) * INTRO_FADE_RATE).min(1.0);
        IntroFrame {
            opacity: 1.0 - fade,
            scale: 1.0 - fade * INTRO_SHRINK,
        }
    }

    /// How far slide `k` has slid over the one before it, in [0, 1].
    pub fn entering_fraction(&self, scroll_y: f64, k: usize) -> f64 {
        if k == 0 {
            return 1.0;
        }
        if self.viewport_height <= 0.0 {
            return 0.0;
        }
        let steps = self.local_offset(scroll_y) / self.viewport_height;
        (steps - (k as f64 - 1.0)).clamp(0.0, 1.0)
    }

    /// Frames for every project slide: the entering one slides up, the one it
    /// covers shrinks and dims.
    pub fn slide_frames(&self, scroll_y: f64) -> Vec<SlideFrame> {
        (1..self.params.steps)
            .map(|k| {
                let own = self.entering_fraction(scroll_y, k);
                let above = if k + 1 < self.params.steps {
                    self.entering_fraction(scroll_y, k + 1)
                } else {
                    0.0
                };
                SlideFrame {
                    index: k,
                    translate_y_pct: (1.0 - own) * 100.0,
                    scale: 1.0 - SLIDE_UNDER_SHRINK * above,
                    opacity: 1.0 - SLIDE_UNDER_DIM * above,
                }
            })
            .collect()
    }
}

/// Coalesces scroll/resize events into at most one recomputation per frame
/// and publishes the result. Owns the header-visibility writer.
pub struct ScrollDriver<S: FrameScheduler> {
    choreographer: ScrollChoreographer,
    scheduler: S,
    frame: FrameCoalescer,
    header: StoreWriter<bool>,
    state: StoreWriter<ScrollState>,
}

impl<S: FrameScheduler> ScrollDriver<S> {
    /// The header writer is released back to "visible" when the driver drops.
    pub fn new(
        choreographer: ScrollChoreographer,
        scheduler: S,
        header: StoreWriter<bool>,
        state: StoreWriter<ScrollState>,
    ) -> Self {
        Self {
            choreographer,
            scheduler,
            frame: FrameCoalescer::new(),
            header: header.release_to(true),
            state,
        }
    }

    /// Event-handler body: never computes, only (re)schedules.
    pub fn request_update(&mut self) {
        self.frame.schedule(&mut self.scheduler);
    }

    pub fn remeasure(&mut self, geometry: ContainerGeometry, viewport_height: f64) {
        self.choreographer.measure(geometry, viewport_height);
    }

    /// Frame callback body: sample once and publish.
    pub fn on_frame(&mut self, scroll_y: f64) -> ScrollState {
        self.frame.take();
        self.update_now(scroll_y)
    }

    /// Synchronous update, used once on mount.
    pub fn update_now(&mut self, scroll_y: f64) -> ScrollState {
        let s = self.choreographer.sample(scroll_y);
        self.header.set(s.header_visible());
        self.state.set(s);
        s
    }

    pub fn choreographer(&self) -> &ScrollChoreographer {
        &self.choreographer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_pending()
    }
}

impl<S: FrameScheduler> Drop for ScrollDriver<S> {
    fn drop(&mut self) {
        self.frame.cancel(&mut self.scheduler);
    }
}
