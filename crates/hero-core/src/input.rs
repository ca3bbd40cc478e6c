//! Pointer and scroll sampling.
//!
//! Event handlers only overwrite the latest sample; bursts between two frames
//! collapse to the newest value. Derived state (pointer activity, applied
//! scroll) is recomputed once per frame by [`InputSampler::refresh`].

use crate::ease::ease;
use glam::Vec2;
use std::time::Duration;

/// Bounding box of the render surface in client (CSS) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Map a client coordinate to [-1, 1] on both axes, +y up.
///
/// A degenerate rect maps everything to the center.
#[inline]
pub fn normalize_pointer(client: Vec2, rect: SurfaceRect) -> Vec2 {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return Vec2::ZERO;
    }
    let x = ((client.x - rect.left) / rect.width) * 2.0 - 1.0;
    let y = -(((client.y - rect.top) / rect.height) * 2.0 - 1.0);
    if !(x.is_finite() && y.is_finite()) {
        return Vec2::ZERO;
    }
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

/// Map a scroll offset to [-1, 1] across the scrollable range (-1 at the top).
///
/// Pages that cannot scroll report 0.
#[inline]
pub fn normalize_scroll(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = document_height - viewport_height;
    if !(max_scroll.is_finite() && max_scroll > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    ((scroll_y / max_scroll) * 2.0 - 1.0).clamp(-1.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Value the animation actually uses; eased toward `target` every frame.
    pub current: f32,
    /// Latest normalized scroll position reported by the host.
    pub target: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub pointer: Vec2,
    pub scroll: ScrollState,
    pub pointer_moving: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InputSampler {
    state: InputState,
    last_move: Option<Duration>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Record an already-normalized pointer sample.
    pub fn pointer_moved(&mut self, pointer: Vec2, at: Duration) {
        self.state.pointer = pointer;
        self.last_move = Some(at);
    }

    pub fn scrolled(&mut self, target: f32) {
        self.state.scroll.target = target.clamp(-1.0, 1.0);
    }

    /// Once-per-frame update of the derived values.
    pub fn refresh(&mut self, now: Duration, stop_after: Duration, scroll_inertia: f32) -> InputState {
        self.state.pointer_moving = self
            .last_move
            .map(|t| now.saturating_sub(t) < stop_after)
            .unwrap_or(false);
        let scroll = &mut self.state.scroll;
        scroll.current = ease(scroll.current, scroll.target, scroll_inertia);
        self.state
    }
}
