//! Digital IO frame: a single start-cord byte.

use crate::codec::{check_capacity, log_rejected, FrameCodec};
use crate::error::{FrameError, Result};
use crate::kind::FrameKind;
use crate::size::IO_FRAME_SIZE;

/// State of the IO board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IoFrame {
    /// Raw start-cord byte: 1 when the cord is inserted, 0 once pulled.
    pub tirette: u8,
}

impl IoFrame {
    /// Create a frame carrying the given start-cord byte.
    pub fn new(tirette: u8) -> Self {
        Self { tirette }
    }

    /// True while the start cord is still in place.
    pub fn is_tirette_inserted(&self) -> bool {
        self.tirette != 0
    }
}

impl FrameCodec for IoFrame {
    const KIND: FrameKind = FrameKind::Io;

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_io(bytes).inspect_err(|err| log_rejected(Self::KIND, bytes.len(), err))
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        check_capacity(IO_FRAME_SIZE, buf)?;
        buf[0] = self.tirette;
        Ok(IO_FRAME_SIZE)
    }

    fn encoded_len(&self) -> usize {
        IO_FRAME_SIZE
    }
}

/// Only the first byte is meaningful; anything after it is ignored.
fn decode_io(bytes: &[u8]) -> Result<IoFrame> {
    let Some(&tirette) = bytes.first() else {
        return Err(FrameError::EmptyInput);
    };
    Ok(IoFrame { tirette })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_passes_through() {
        for tirette in [0u8, 1, 0x7F] {
            let frame = IoFrame::decode(&[tirette]).unwrap();
            assert_eq!(frame.tirette, tirette);
            assert_eq!(frame.to_bytes().unwrap().as_ref(), &[tirette]);
        }
        assert!(IoFrame::new(1).is_tirette_inserted());
        assert!(!IoFrame::new(0).is_tirette_inserted());
    }

    #[test]
    fn decode_rejects_only_empty_input() {
        assert_eq!(IoFrame::decode(&[]), Err(FrameError::EmptyInput));
        assert_eq!(IoFrame::decode(&[1, 0]), Ok(IoFrame::new(1)));
        assert_eq!(IoFrame::decode(&[0, 0xFF, 0xFF]), Ok(IoFrame::new(0)));
    }

    #[test]
    fn encode_needs_one_byte() {
        assert!(matches!(
            IoFrame::new(1).encode(&mut []),
            Err(FrameError::BufferTooSmall { needed: 1, .. })
        ));
        let mut buf = [0u8; 4];
        assert_eq!(IoFrame::new(1).encode(&mut buf), Ok(1));
        assert_eq!(buf, [1, 0, 0, 0]);
    }
}
