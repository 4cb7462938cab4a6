//! Input translation: raw device state mapped to simulation intents.
//!
//! # Invariants
//! - The simulation consumes intents, never key codes or button events.
//! - Opposing keys cancel instead of winning by order of arrival.
//! - Edge latches fire exactly once per press, however often the device
//!   repeats.

pub mod intent;

pub use intent::{MouseLook, MoveIntent, PressLatch};

pub fn crate_info() -> &'static str {
    "ironsight-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
