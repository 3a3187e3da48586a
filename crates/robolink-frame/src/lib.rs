//! Fixed-layout binary frames exchanged between a robot's high-level
//! controller and its actuator electronics.
//!
//! Every frame kind is a bounded list of fixed-size device records:
//! - servo frames: 1 count byte, then 6 bytes per servo
//! - motor frames: 3 count bytes, then controlled (4 B), uncontrolled (2 B)
//!   and brushless (2 B) records
//! - IO frames: a single byte
//!
//! Device id 0 marks an empty slot and never appears on the wire. Decoding
//! checks the exact frame length, rejects reserved and duplicate ids, and
//! never returns a partial result. Start/stop bytes, checksums and
//! retransmission belong to the transport, not to this crate.

pub mod codec;
pub mod error;
pub mod io;
pub mod kind;
pub mod motor;
pub mod reserved;
pub mod servo;
pub mod size;
mod slots;

pub use codec::{Frame, FrameCodec};
pub use error::{DeviceCategory, FrameError, Result};
pub use io::IoFrame;
pub use kind::{FrameKind, UnknownFrameKind};
pub use motor::{Brushless, ControlledMotor, MotorFrame, Rotation, UncontrolledMotor};
pub use reserved::{AvoidanceFrame, MoveType, MovingFrame};
pub use servo::{BlockingMode, Color, CommandType, Servo, ServoFrame};
pub use size::{
    motor_frame_size, servo_frame_size, IO_FRAME_SIZE, MAX_BRUSHLESS, MAX_CONTROLLED_MOTORS,
    MAX_MOTOR_FRAME_SIZE, MAX_SERVOS, MAX_SERVO_FRAME_SIZE, MAX_UNCONTROLLED_MOTORS,
};
