//! Message kinds exchanged over the link.

use std::fmt;
use std::str::FromStr;

/// Identifies which codec a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Servo-motor state.
    Servo,
    /// Controlled, uncontrolled and brushless motor state.
    Motor,
    /// Digital IO (start cord).
    Io,
    /// Collision-avoidance telemetry. No wire format yet.
    Avoidance,
    /// Motion/navigation commands. No wire format yet.
    Moving,
}

impl FrameKind {
    /// Every kind, in declaration order.
    pub const ALL: [FrameKind; 5] = [
        FrameKind::Servo,
        FrameKind::Motor,
        FrameKind::Io,
        FrameKind::Avoidance,
        FrameKind::Moving,
    ];

    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::Servo => "servo",
            FrameKind::Motor => "motor",
            FrameKind::Io => "io",
            FrameKind::Avoidance => "avoidance",
            FrameKind::Moving => "moving",
        }
    }

    /// Returns true if the kind has a wire format.
    pub fn is_defined(self) -> bool {
        !matches!(self, FrameKind::Avoidance | FrameKind::Moving)
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`FrameKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown frame kind: {0}")]
pub struct UnknownFrameKind(pub String);

impl FromStr for FrameKind {
    type Err = UnknownFrameKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFrameKind(s.to_string()))
    }
}
