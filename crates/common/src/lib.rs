//! Shared leaf types for the ironsight demo.
//!
//! # Invariants
//! - Everything here is a small `Copy` value type with no behavior beyond
//!   derivation; simulation rules live in `ironsight-core`.

mod camera;
mod color;

pub use camera::Camera;
pub use color::Rgba;

pub fn crate_info() -> &'static str {
    "ironsight-common v0.1.0"
}
