//! Mount/teardown bookkeeping around the host's frame primitive.

/// What the engine needs from its host environment.
///
/// The browser implements this with `requestAnimationFrame` and event
/// listeners; tests implement it with counters.
pub trait FrameHost {
    type Handle: Copy;

    /// Schedule one callback for the next display refresh.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);

    /// Remove every input listener registered at mount.
    fn detach_inputs(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Mounted,
    TornDown,
}

/// Owns the host and the single outstanding frame request.
///
/// Invariants: at most one frame is pending, nothing is scheduled once torn
/// down, and teardown runs its side effects exactly once.
pub struct Lifecycle<H: FrameHost> {
    host: H,
    pending: Option<H::Handle>,
    phase: Phase,
}

impl<H: FrameHost> Lifecycle<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: None,
            phase: Phase::Mounted,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the next frame unless one is already pending or we are gone.
    pub fn schedule(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if self.pending.is_none() {
            self.pending = self.host.request_frame();
        }
        self.pending.is_some()
    }

    /// The pending frame has fired; returns whether it may run.
    pub fn frame_fired(&mut self) -> bool {
        self.pending = None;
        self.is_mounted()
    }

    /// Cancel the pending frame, then detach inputs. Returns false if already
    /// torn down.
    pub fn teardown(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.phase = Phase::TornDown;
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        self.host.detach_inputs();
        true
    }
}
