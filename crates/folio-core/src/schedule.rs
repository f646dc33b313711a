/// Opaque id of a pending animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host capability that runs a callback before the next repaint.
pub trait FrameScheduler {
    /// `None` when the host refused to schedule.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Holds at most one pending frame: scheduling again cancels the previous one.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: Option<FrameHandle>,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.pending.take() {
            scheduler.cancel_frame(h);
        }
        self.pending = scheduler.request_frame();
    }

    /// Called when the frame fires; the handle is no longer cancellable.
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.pending.take() {
            scheduler.cancel_frame(h);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
