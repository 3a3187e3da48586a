use std::fmt;

use crate::kind::FrameKind;

/// The record list a device belongs to.
///
/// IDs only have to be unique within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCategory {
    Servo,
    Controlled,
    Uncontrolled,
    Brushless,
}

impl DeviceCategory {
    /// Human-readable list name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceCategory::Servo => "servo",
            DeviceCategory::Controlled => "controlled motor",
            DeviceCategory::Uncontrolled => "uncontrolled motor",
            DeviceCategory::Brushless => "brushless",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The input contains no bytes at all.
    #[error("empty frame")]
    EmptyInput,

    /// The header counts imply a frame size different from the input length.
    #[error("malformed {kind} frame (expected {expected} bytes, got {actual})")]
    MalformedLength {
        kind: FrameKind,
        expected: usize,
        actual: usize,
    },

    /// A header count is larger than the number of slots available.
    #[error("too many {category} records ({declared}, max {capacity})")]
    CapacityExceeded {
        category: DeviceCategory,
        declared: usize,
        capacity: usize,
    },

    /// A record carries the reserved id 0.
    #[error("{category} record {index} uses reserved id 0")]
    InvalidDeviceId {
        category: DeviceCategory,
        index: usize,
    },

    /// Two records of the same category share an id.
    #[error("duplicate {category} id {id}")]
    DuplicateDeviceId { category: DeviceCategory, id: u8 },

    /// Every slot of the category is already populated.
    #[error("no free {category} slot (capacity {capacity})")]
    SlotsFull {
        category: DeviceCategory,
        capacity: usize,
    },

    /// The output buffer cannot hold the encoded frame.
    #[error("buffer too small ({available} bytes, need {needed})")]
    BufferTooSmall { needed: usize, available: usize },

    /// The frame kind has no wire format yet.
    #[error("{kind} frames are not defined yet")]
    Undefined { kind: FrameKind },
}

pub type Result<T> = std::result::Result<T, FrameError>;
