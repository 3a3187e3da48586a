//! Servo-motor state frames.
//!
//! Wire format:
//! ```text
//! ┌───────────┬──────────────────────────────────────────────────────┐
//! │ count (1) │ count × record                                       │
//! └───────────┴──────────────────────────────────────────────────────┘
//!
//! record (6 bytes):
//! ┌────────┬───────────────┬──────────────┬───────────┐
//! │ id (1) │ position (BE) │ command (BE) │ flags (1) │
//! └────────┴───────────────┴──────────────┴───────────┘
//!
//! flags: 0b00TBMCCC  T=command_type  B=blocked  M=blocking_mode  C=color
//! ```

use bytes::{Buf, BufMut};

use crate::codec::{check_capacity, check_length, log_rejected, FrameCodec};
use crate::error::{DeviceCategory, FrameError, Result};
use crate::kind::FrameKind;
use crate::size::{servo_frame_size, MAX_SERVOS};
use crate::slots::{self, Slot};

const COMMAND_TYPE_BIT: u8 = 0b0010_0000;
const BLOCKED_BIT: u8 = 0b0001_0000;
const BLOCKING_MODE_BIT: u8 = 0b0000_1000;
const COLOR_MASK: u8 = 0b0000_0111;

/// How [`Servo::command`] is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandType {
    /// Position target.
    #[default]
    Angle = 0,
    /// Speed target.
    Speed = 1,
}

/// Behaviour of a servo when an external force blocks it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockingMode {
    /// Release torque when blocked.
    #[default]
    Unblocking = 0,
    /// Keep pushing against the obstacle.
    HoldOnBlock = 1,
}

/// LED colour shown by a servo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Color {
    #[default]
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl CommandType {
    /// Lowercase name used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandType::Angle => "angle",
            CommandType::Speed => "speed",
        }
    }
}

impl BlockingMode {
    /// Lowercase name used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockingMode::Unblocking => "unblocking",
            BlockingMode::HoldOnBlock => "hold_on_block",
        }
    }
}

impl Color {
    /// Lowercase colour name.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }

    /// Decode the low three bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & COLOR_MASK {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            _ => Color::White,
        }
    }
}

/// One servo-motor. `id == 0` marks an empty slot.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Servo {
    pub id: u8,
    /// Last known position.
    pub position: u16,
    /// Position or speed target, see [`Servo::command_type`].
    pub command: u16,
    pub command_type: CommandType,
    /// Set by the electronics while the servo is forcing.
    pub blocked: bool,
    pub blocking_mode: BlockingMode,
    pub color: Color,
}

impl Servo {
    /// A servo with every field but the id at its default.
    pub fn new(id: u8) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = self.color as u8;
        if self.command_type == CommandType::Speed {
            flags |= COMMAND_TYPE_BIT;
        }
        if self.blocked {
            flags |= BLOCKED_BIT;
        }
        if self.blocking_mode == BlockingMode::HoldOnBlock {
            flags |= BLOCKING_MODE_BIT;
        }
        flags
    }

    fn apply_flags(&mut self, flags: u8) {
        self.command_type = if flags & COMMAND_TYPE_BIT != 0 {
            CommandType::Speed
        } else {
            CommandType::Angle
        };
        self.blocked = flags & BLOCKED_BIT != 0;
        self.blocking_mode = if flags & BLOCKING_MODE_BIT != 0 {
            BlockingMode::HoldOnBlock
        } else {
            BlockingMode::Unblocking
        };
        self.color = Color::from_bits(flags);
    }
}

impl Slot for Servo {
    fn id(&self) -> u8 {
        self.id
    }
}

// Empty slots compare equal whatever their padding holds.
impl PartialEq for Servo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && (self.id == 0
                || (self.position == other.position
                    && self.command == other.command
                    && self.command_type == other.command_type
                    && self.blocked == other.blocked
                    && self.blocking_mode == other.blocking_mode
                    && self.color == other.color))
    }
}

impl Eq for Servo {}

/// Up to [`MAX_SERVOS`] servos.
///
/// Slots are kept in wire order; an empty slot (`id == 0`) is skipped when
/// encoding, so gaps never shift the records that follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServoFrame {
    pub servos: [Servo; MAX_SERVOS],
}

impl ServoFrame {
    /// A frame with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire size of a frame carrying `nb_servos` servos.
    pub const fn expected_frame_size(nb_servos: usize) -> usize {
        servo_frame_size(nb_servos)
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        slots::count(&self.servos)
    }

    /// True when no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated servos in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Servo> {
        slots::populated(&self.servos)
    }

    /// Look up servo `id`. Id 0 never matches.
    pub fn get(&self, id: u8) -> Option<&Servo> {
        slots::find(&self.servos, id)
    }

    /// Mutable access to servo `id`.
    pub fn get_mut(&mut self, id: u8) -> Option<&mut Servo> {
        slots::find_mut(&mut self.servos, id)
    }

    /// Store `servo` in the first empty slot.
    pub fn push(&mut self, servo: Servo) -> Result<()> {
        slots::insert(&mut self.servos, servo, DeviceCategory::Servo)
    }

    /// Empty the slot of servo `id`.
    pub fn remove(&mut self, id: u8) -> Option<Servo> {
        slots::remove(&mut self.servos, id)
    }
}

impl FrameCodec for ServoFrame {
    const KIND: FrameKind = FrameKind::Servo;

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_servos(bytes)
            .inspect(|frame| tracing::trace!(servos = frame.len(), "decoded servo frame"))
            .inspect_err(|err| log_rejected(Self::KIND, bytes.len(), err))
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        let count = self.len();
        let needed = servo_frame_size(count);
        check_capacity(needed, buf)?;

        let mut dst = &mut buf[..];
        dst.put_u8(count as u8);
        for servo in self.iter() {
            dst.put_u8(servo.id);
            dst.put_u16(servo.position);
            dst.put_u16(servo.command);
            dst.put_u8(servo.flags());
        }

        tracing::trace!(servos = count, len = needed, "encoded servo frame");
        Ok(needed)
    }

    fn encoded_len(&self) -> usize {
        servo_frame_size(self.len())
    }
}

fn decode_servos(bytes: &[u8]) -> Result<ServoFrame> {
    let (&declared, mut src) = bytes.split_first().ok_or(FrameError::EmptyInput)?;
    let declared = usize::from(declared);

    check_length(FrameKind::Servo, servo_frame_size(declared), bytes.len())?;
    slots::check_declared(DeviceCategory::Servo, declared, MAX_SERVOS)?;

    let mut frame = ServoFrame::new();
    for index in 0..declared {
        let id = src.get_u8();
        slots::check_new_id(&frame.servos[..index], id, index, DeviceCategory::Servo)?;

        let servo = &mut frame.servos[index];
        servo.id = id;
        servo.position = src.get_u16();
        servo.command = src.get_u16();
        servo.apply_flags(src.get_u8());
    }

    Ok(frame)
}
