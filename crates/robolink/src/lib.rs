//! Frames exchanged between a robot's high-level controller and its actuator electronics.
//!
//! # Crate Structure
//!
//! - [`frame`]: servo, motor and IO codecs (re-exported from `robolink-frame`)
//!
//! The `robolink` binary (behind the `cli` feature) decodes, encodes and sizes frames
//! from the command line.

/// Re-export frame types.
pub mod frame {
    pub use robolink_frame::*;
}
