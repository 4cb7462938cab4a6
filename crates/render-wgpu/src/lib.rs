//! wgpu backend for [`ironsight_scene::FramePlan`].
//!
//! Two pipelines (lit instanced meshes, flat line lists) and two passes per
//! frame: the world pass clears to the plan's sky color, the weapon pass
//! loads the color image back, clears depth, and draws the weapon mesh into
//! the bottom-right third of the surface.
//!
//! # Invariants
//! - Instances are drawn in the plan's order; grouping into runs never
//!   reorders across mesh kinds.
//! - The depth texture always matches the surface size; resize recreates it.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
