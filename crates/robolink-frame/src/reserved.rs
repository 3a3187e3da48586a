//! Kinds reserved on the link without a wire format yet.
//!
//! Their decoders always report [`FrameError::Undefined`] and their encoders
//! always write zero bytes, so both sides can already route them.

use crate::codec::{log_rejected, FrameCodec};
use crate::error::{FrameError, Result};
use crate::kind::FrameKind;

/// Collision-avoidance telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvoidanceFrame {
    pub angle_detection_adversary: i32,
    pub adversary_detected: bool,
}

/// Motion order for the navigation board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveType {
    #[default]
    Stop = 0,
    Forward = 1,
    Backward = 2,
    TurnRelative = 3,
    TurnAbsolute = 4,
    ForwardInfinity = 5,
    BackwardInfinity = 6,
}

/// Motion/navigation commands and feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovingFrame {
    pub pos_x: u16,
    pub pos_y: u16,
    pub angle: u16,
    pub linear_speed: u16,
    pub angular_speed: u16,
    /// Lets the controller override the current coordinates.
    pub reset: bool,
    pub move_type: MoveType,
    pub blocked: bool,
    pub moving_done: bool,
    pub accuracy_reached: bool,
    pub servitude_on_off: bool,
    pub led: bool,
}

fn undefined<T>(kind: FrameKind, bytes: &[u8]) -> Result<T> {
    let err = FrameError::Undefined { kind };
    log_rejected(kind, bytes.len(), &err);
    Err(err)
}

impl FrameCodec for AvoidanceFrame {
    const KIND: FrameKind = FrameKind::Avoidance;

    fn decode(bytes: &[u8]) -> Result<Self> {
        undefined(Self::KIND, bytes)
    }

    fn encode(&self, _buf: &mut [u8]) -> Result<usize> {
        Ok(0)
    }

    fn encoded_len(&self) -> usize {
        0
    }
}

impl FrameCodec for MovingFrame {
    const KIND: FrameKind = FrameKind::Moving;

    fn decode(bytes: &[u8]) -> Result<Self> {
        undefined(Self::KIND, bytes)
    }

    fn encode(&self, _buf: &mut [u8]) -> Result<usize> {
        Ok(0)
    }

    fn encoded_len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_always_fails() {
        for input in [&[][..], &[0u8][..], &[1u8, 2, 3, 4][..]] {
            assert_eq!(
                AvoidanceFrame::decode(input),
                Err(FrameError::Undefined {
                    kind: FrameKind::Avoidance
                })
            );
            assert_eq!(
                MovingFrame::decode(input),
                Err(FrameError::Undefined {
                    kind: FrameKind::Moving
                })
            );
        }
    }

    #[test]
    fn encode_writes_nothing() {
        let mut buf = [0xAAu8; 8];
        let avoidance = AvoidanceFrame {
            angle_detection_adversary: -90,
            adversary_detected: true,
        };
        assert_eq!(avoidance.encode(&mut buf), Ok(0));

        let moving = MovingFrame {
            pos_x: 100,
            move_type: MoveType::TurnAbsolute,
            led: true,
            ..MovingFrame::default()
        };
        assert_eq!(moving.encode(&mut buf), Ok(0));
        assert_eq!(moving.encode(&mut []), Ok(0));
        assert_eq!(buf, [0xAA; 8]);
    }
}
