use glam::{Vec2, vec2};

/// Which movement keys are held this frame.
///
/// The window layer sets these from whatever key codes it cares about; the
/// simulation only ever sees the resulting axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub right: bool,
    pub left: bool,
}

impl MoveIntent {
    /// Collapse the held keys into `(forward, strafe)` axes in -1..=1.
    ///
    /// Opposing keys cancel to zero. The axes are intentionally not
    /// normalized when both are live; the walk code owns that behavior.
    pub fn axes(&self) -> Vec2 {
        let forward = (self.forward as i8 - self.back as i8) as f32;
        let strafe = (self.right as i8 - self.left as i8) as f32;
        vec2(forward, strafe)
    }

    pub fn any(&self) -> bool {
        self.forward || self.back || self.right || self.left
    }
}

/// Turns a held button level into a one-shot edge.
///
/// Feed it the current pressed state on every event; it reports `true`
/// only on the transition from released to pressed, so auto-repeat and
/// duplicate press events collapse into a single trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressLatch {
    held: bool,
}

impl PressLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current level; returns `true` on a rising edge.
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Accumulates raw mouse motion between frames.
///
/// Device events arrive many times per frame; the look code wants one
/// delta per simulation step. `take` drains the pending motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseLook {
    pending: Vec2,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dx: f32, dy: f32) {
        self.pending += vec2(dx, dy);
    }

    /// Return the motion accumulated since the last call and reset it.
    pub fn take(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }
}
