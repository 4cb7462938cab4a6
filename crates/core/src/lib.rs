//! Simulation core: authoritative game state, stepping, and hit resolution.
//!
//! # Invariants
//! - All state mutations flow through explicit operations on [`Session`].
//! - Stepping with a fixed `dt` sequence is deterministic; no wall clock is
//!   read anywhere in this crate.
//! - Hit resolution is a pure function of the ray and the current state.

pub mod enemy;
pub mod player;
pub mod raycast;
pub mod session;
pub mod target;
pub mod tracer;

/// Seconds a freshly hit target or enemy stays flashed white.
pub const HIT_FLASH_DURATION: f32 = 0.2;

pub use enemy::Enemy;
pub use player::Player;
pub use raycast::{Aabb, Ray, RayHit};
pub use session::{Session, ShotReport};
pub use target::Target;
pub use tracer::{Tracer, TracerPool};
