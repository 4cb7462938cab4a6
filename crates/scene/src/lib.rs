//! Frame composition: renderer-agnostic draw plans.
//!
//! # Invariants
//! - Composing a frame never mutates the session; render state is derived.
//! - The plan's draw order is the paint order: opaque geometry first, the
//!   translucent player box last among meshes, tracer lines last of all.
//! - Backends consume [`FramePlan`] and nothing else; none of them see the
//!   session.

mod plan;
mod renderer;

pub use plan::{FramePlan, HudState, LineSegment, MeshInstance, MeshKind, WeaponPane, compose};
pub use renderer::{Renderer, TextRenderer};

pub fn crate_info() -> &'static str {
    "ironsight-scene v0.1.0"
}
