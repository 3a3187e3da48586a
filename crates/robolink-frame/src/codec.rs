use bytes::BytesMut;

use crate::error::{FrameError, Result};
use crate::io::IoFrame;
use crate::kind::FrameKind;
use crate::motor::MotorFrame;
use crate::reserved::{AvoidanceFrame, MovingFrame};
use crate::servo::ServoFrame;

/// Encoding and decoding of one message kind.
///
/// Decoding either yields a complete record set or an error; there is no
/// partial result. Encoding writes nothing when it fails.
pub trait FrameCodec: Sized {
    /// The kind this codec handles.
    const KIND: FrameKind;

    /// Decode a complete frame. The input must be exactly one frame long.
    fn decode(bytes: &[u8]) -> Result<Self>;

    /// Encode into `buf`, returning the number of bytes written.
    fn encode(&self, buf: &mut [u8]) -> Result<usize>;

    /// The exact number of bytes [`encode`](Self::encode) will write.
    fn encoded_len(&self) -> usize;

    /// Encode into a freshly allocated buffer sized by [`encoded_len`](Self::encoded_len).
    fn to_bytes(&self) -> Result<BytesMut> {
        let mut dst = BytesMut::zeroed(self.encoded_len());
        let written = self.encode(&mut dst[..])?;
        dst.truncate(written);
        Ok(dst)
    }
}

/// A frame of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Servo(ServoFrame),
    Motor(MotorFrame),
    Io(IoFrame),
    Avoidance(AvoidanceFrame),
    Moving(MovingFrame),
}

impl Frame {
    /// Decode `bytes` with the codec of `kind`.
    pub fn decode(kind: FrameKind, bytes: &[u8]) -> Result<Self> {
        match kind {
            FrameKind::Servo => ServoFrame::decode(bytes).map(Frame::Servo),
            FrameKind::Motor => MotorFrame::decode(bytes).map(Frame::Motor),
            FrameKind::Io => IoFrame::decode(bytes).map(Frame::Io),
            FrameKind::Avoidance => AvoidanceFrame::decode(bytes).map(Frame::Avoidance),
            FrameKind::Moving => MovingFrame::decode(bytes).map(Frame::Moving),
        }
    }

    /// The kind of the wrapped frame.
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Servo(_) => FrameKind::Servo,
            Frame::Motor(_) => FrameKind::Motor,
            Frame::Io(_) => FrameKind::Io,
            Frame::Avoidance(_) => FrameKind::Avoidance,
            Frame::Moving(_) => FrameKind::Moving,
        }
    }

    /// Encode into `buf` with the wrapped frame's codec.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        match self {
            Frame::Servo(frame) => frame.encode(buf),
            Frame::Motor(frame) => frame.encode(buf),
            Frame::Io(frame) => frame.encode(buf),
            Frame::Avoidance(frame) => frame.encode(buf),
            Frame::Moving(frame) => frame.encode(buf),
        }
    }

    /// Exact wire size of the wrapped frame.
    pub fn encoded_len(&self) -> usize {
        match self {
            Frame::Servo(frame) => frame.encoded_len(),
            Frame::Motor(frame) => frame.encoded_len(),
            Frame::Io(frame) => frame.encoded_len(),
            Frame::Avoidance(frame) => frame.encoded_len(),
            Frame::Moving(frame) => frame.encoded_len(),
        }
    }

    /// Encode into a freshly allocated buffer.
    pub fn to_bytes(&self) -> Result<BytesMut> {
        match self {
            Frame::Servo(frame) => frame.to_bytes(),
            Frame::Motor(frame) => frame.to_bytes(),
            Frame::Io(frame) => frame.to_bytes(),
            Frame::Avoidance(frame) => frame.to_bytes(),
            Frame::Moving(frame) => frame.to_bytes(),
        }
    }
}

impl From<ServoFrame> for Frame {
    fn from(frame: ServoFrame) -> Self {
        Frame::Servo(frame)
    }
}

impl From<MotorFrame> for Frame {
    fn from(frame: MotorFrame) -> Self {
        Frame::Motor(frame)
    }
}

impl From<IoFrame> for Frame {
    fn from(frame: IoFrame) -> Self {
        Frame::Io(frame)
    }
}

/// Decode-side length check: the input must match the size implied by its header.
pub(crate) fn check_length(kind: FrameKind, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(FrameError::MalformedLength {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Shared precondition of every encoder: the target must hold `needed` bytes.
pub(crate) fn check_capacity(needed: usize, buf: &[u8]) -> Result<()> {
    if buf.is_empty() || buf.len() < needed {
        tracing::debug!(needed, available = buf.len(), "refusing to encode");
        return Err(FrameError::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

pub(crate) fn log_rejected(kind: FrameKind, len: usize, err: &FrameError) {
    tracing::debug!(%kind, len, error = %err, "rejected frame");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::servo::Servo;

    #[test]
    fn test_empty_buffer_is_too_small_even_for_zero_bytes() {
        assert_eq!(
            check_capacity(0, &[]),
            Err(FrameError::BufferTooSmall {
                needed: 0,
                available: 0
            })
        );
        assert!(check_capacity(1, &[0u8; 1]).is_ok());
        assert!(check_capacity(2, &[0u8; 1]).is_err());
    }

    #[test]
    fn test_io_ignores_trailing_bytes() {
        let frame = Frame::decode(FrameKind::Io, &[1, 0]).unwrap();
        assert_eq!(frame, Frame::Io(IoFrame::new(1)));
        assert_eq!(frame.encoded_len(), 1);
    }

    #[test]
    fn test_decode_dispatches_on_kind() {
        let frame = Frame::decode(FrameKind::Servo, &[0]).unwrap();
        assert_eq!(frame.kind(), FrameKind::Servo);

        let frame = Frame::decode(FrameKind::Motor, &[0, 0, 0]).unwrap();
        assert_eq!(frame.kind(), FrameKind::Motor);

        let frame = Frame::decode(FrameKind::Io, &[1]).unwrap();
        assert_eq!(frame, Frame::Io(IoFrame { tirette: 1 }));
    }

    #[test]
    fn test_same_bytes_differ_per_kind() {
        // One byte is a valid IO frame and an empty servo frame, but too short for motors.
        assert!(Frame::decode(FrameKind::Io, &[0]).is_ok());
        assert!(Frame::decode(FrameKind::Servo, &[0]).is_ok());
        assert!(matches!(
            Frame::decode(FrameKind::Motor, &[0]),
            Err(FrameError::MalformedLength { expected: 3, .. })
        ));
    }

    #[test]
    fn test_reserved_kinds_always_fail() {
        assert!(matches!(
            Frame::decode(FrameKind::Avoidance, &[1, 2, 3]),
            Err(FrameError::Undefined {
                kind: FrameKind::Avoidance
            })
        ));
        assert!(matches!(
            Frame::decode(FrameKind::Moving, &[]),
            Err(FrameError::Undefined {
                kind: FrameKind::Moving
            })
        ));
    }

    #[test]
    fn test_to_bytes_matches_encode() {
        let mut servos = ServoFrame::new();
        servos.push(Servo::new(12)).unwrap();
        let frame = Frame::from(servos);

        let bytes = frame.to_bytes().unwrap();
        assert_eq!(bytes.len(), frame.encoded_len());

        let mut buf = [0u8; 64];
        let written = frame.encode(&mut buf).unwrap();
        assert_eq!(&buf[..written], bytes.as_ref());
    }

    #[test]
    fn test_reserved_to_bytes_is_empty() {
        let frame = Frame::Moving(MovingFrame::default());
        assert_eq!(frame.encoded_len(), 0);
        assert!(frame.to_bytes().unwrap().is_empty());
    }
}
