//! Motor state frames: controlled motors, uncontrolled motors and brushless devices.
//!
//! Wire format:
//! ```text
//! ┌────────────────┬──────────────────┬───────────────┐
//! │ controlled (1) │ uncontrolled (1) │ brushless (1) │
//! └────────────────┴──────────────────┴───────────────┘
//! controlled   × [id, wanted_angle, wanted_turns, flags]   flags: 0b000000FN  F=finished  N=new_command
//! uncontrolled × [id, flags]                               flags: 0b000000OR  O=on_off    R=rotation
//! brushless    × [id, on_off]
//! ```
//!
//! IDs are unique within a category; the same id may appear once in each.

use bytes::{Buf, BufMut};

use crate::codec::{check_capacity, check_length, log_rejected, FrameCodec};
use crate::error::{DeviceCategory, FrameError, Result};
use crate::kind::FrameKind;
use crate::size::{
    motor_frame_size, MAX_BRUSHLESS, MAX_CONTROLLED_MOTORS, MAX_UNCONTROLLED_MOTORS,
    MOTOR_HEADER_SIZE,
};
use crate::slots::{self, Slot};

const FINISHED_BIT: u8 = 0b0000_0010;
const NEW_COMMAND_BIT: u8 = 0b0000_0001;
const ON_OFF_BIT: u8 = 0b0000_0010;
const ROTATION_BIT: u8 = 0b0000_0001;

/// A motor driven to an angle and a number of turns.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlledMotor {
    pub id: u8,
    pub wanted_angle_position: u8,
    pub wanted_nb_turns: u8,
    /// Set by the electronics once the command completed.
    pub finished: bool,
    /// Set by the controller when a new target replaces the previous one.
    pub new_command: bool,
}

/// Direction of an uncontrolled motor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rotation {
    #[default]
    Clockwise = 0,
    CounterClockwise = 1,
}

impl Rotation {
    /// Snake-case name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::Clockwise => "clockwise",
            Rotation::CounterClockwise => "counter_clockwise",
        }
    }
}

/// An on/off motor without position feedback.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UncontrolledMotor {
    pub id: u8,
    pub on_off: bool,
    pub rotation: Rotation,
}

/// A brushless device. `on_off` travels as a raw byte.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Brushless {
    pub id: u8,
    pub on_off: u8,
}

impl ControlledMotor {
    /// An idle motor with the given id.
    pub fn new(id: u8) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.finished {
            flags |= FINISHED_BIT;
        }
        if self.new_command {
            flags |= NEW_COMMAND_BIT;
        }
        flags
    }
}

impl UncontrolledMotor {
    /// A stopped clockwise motor with the given id.
    pub fn new(id: u8) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = self.rotation as u8;
        if self.on_off {
            flags |= ON_OFF_BIT;
        }
        flags
    }
}

impl Brushless {
    /// A switched-off device with the given id.
    pub fn new(id: u8) -> Self {
        Self { id, on_off: 0 }
    }
}

impl Slot for ControlledMotor {
    fn id(&self) -> u8 {
        self.id
    }
}

impl Slot for UncontrolledMotor {
    fn id(&self) -> u8 {
        self.id
    }
}

impl Slot for Brushless {
    fn id(&self) -> u8 {
        self.id
    }
}

impl PartialEq for ControlledMotor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && (self.id == 0
                || (self.wanted_angle_position == other.wanted_angle_position
                    && self.wanted_nb_turns == other.wanted_nb_turns
                    && self.finished == other.finished
                    && self.new_command == other.new_command))
    }
}

impl Eq for ControlledMotor {}

impl PartialEq for UncontrolledMotor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && (self.id == 0 || (self.on_off == other.on_off && self.rotation == other.rotation))
    }
}

impl Eq for UncontrolledMotor {}

impl PartialEq for Brushless {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && (self.id == 0 || self.on_off == other.on_off)
    }
}

impl Eq for Brushless {}

/// The three motor lists, each holding up to 8 devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorFrame {
    pub controlled_motors: [ControlledMotor; MAX_CONTROLLED_MOTORS],
    pub uncontrolled_motors: [UncontrolledMotor; MAX_UNCONTROLLED_MOTORS],
    pub brushless: [Brushless; MAX_BRUSHLESS],
}

impl MotorFrame {
    /// A frame with every slot of every category empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire size of a frame with the given category counts.
    pub const fn expected_frame_size(
        controlled: usize,
        uncontrolled: usize,
        brushless: usize,
    ) -> usize {
        motor_frame_size(controlled, uncontrolled, brushless)
    }

    /// Populated `(controlled, uncontrolled, brushless)` counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            slots::count(&self.controlled_motors),
            slots::count(&self.uncontrolled_motors),
            slots::count(&self.brushless),
        )
    }

    /// True when all three categories are empty.
    pub fn is_empty(&self) -> bool {
        self.counts() == (0, 0, 0)
    }

    /// Populated controlled motors in slot order.
    pub fn iter_controlled(&self) -> impl Iterator<Item = &ControlledMotor> {
        slots::populated(&self.controlled_motors)
    }

    /// Populated uncontrolled motors in slot order.
    pub fn iter_uncontrolled(&self) -> impl Iterator<Item = &UncontrolledMotor> {
        slots::populated(&self.uncontrolled_motors)
    }

    /// Populated brushless devices in slot order.
    pub fn iter_brushless(&self) -> impl Iterator<Item = &Brushless> {
        slots::populated(&self.brushless)
    }

    /// Look up controlled motor `id`. Id 0 never matches.
    pub fn get_controlled(&self, id: u8) -> Option<&ControlledMotor> {
        slots::find(&self.controlled_motors, id)
    }

    /// Look up uncontrolled motor `id`. Id 0 never matches.
    pub fn get_uncontrolled(&self, id: u8) -> Option<&UncontrolledMotor> {
        slots::find(&self.uncontrolled_motors, id)
    }

    /// Look up brushless device `id`. Id 0 never matches.
    pub fn get_brushless(&self, id: u8) -> Option<&Brushless> {
        slots::find(&self.brushless, id)
    }

    /// Mutable access to controlled motor `id`.
    pub fn get_controlled_mut(&mut self, id: u8) -> Option<&mut ControlledMotor> {
        slots::find_mut(&mut self.controlled_motors, id)
    }

    /// Mutable access to uncontrolled motor `id`.
    pub fn get_uncontrolled_mut(&mut self, id: u8) -> Option<&mut UncontrolledMotor> {
        slots::find_mut(&mut self.uncontrolled_motors, id)
    }

    /// Mutable access to brushless device `id`.
    pub fn get_brushless_mut(&mut self, id: u8) -> Option<&mut Brushless> {
        slots::find_mut(&mut self.brushless, id)
    }

    /// Store `motor` in the first empty controlled slot.
    pub fn push_controlled(&mut self, motor: ControlledMotor) -> Result<()> {
        slots::insert(&mut self.controlled_motors, motor, DeviceCategory::Controlled)
    }

    /// Store `motor` in the first empty uncontrolled slot.
    pub fn push_uncontrolled(&mut self, motor: UncontrolledMotor) -> Result<()> {
        slots::insert(
            &mut self.uncontrolled_motors,
            motor,
            DeviceCategory::Uncontrolled,
        )
    }

    /// Store `device` in the first empty brushless slot.
    pub fn push_brushless(&mut self, device: Brushless) -> Result<()> {
        slots::insert(&mut self.brushless, device, DeviceCategory::Brushless)
    }

    /// Empty the slot of controlled motor `id`.
    pub fn remove_controlled(&mut self, id: u8) -> Option<ControlledMotor> {
        slots::remove(&mut self.controlled_motors, id)
    }

    /// Empty the slot of uncontrolled motor `id`.
    pub fn remove_uncontrolled(&mut self, id: u8) -> Option<UncontrolledMotor> {
        slots::remove(&mut self.uncontrolled_motors, id)
    }

    /// Empty the slot of brushless device `id`.
    pub fn remove_brushless(&mut self, id: u8) -> Option<Brushless> {
        slots::remove(&mut self.brushless, id)
    }
}

impl FrameCodec for MotorFrame {
    const KIND: FrameKind = FrameKind::Motor;

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_motors(bytes)
            .inspect(|frame| {
                let (controlled, uncontrolled, brushless) = frame.counts();
                tracing::trace!(controlled, uncontrolled, brushless, "decoded motor frame");
            })
            .inspect_err(|err| log_rejected(Self::KIND, bytes.len(), err))
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        let (controlled, uncontrolled, brushless) = self.counts();
        let needed = motor_frame_size(controlled, uncontrolled, brushless);
        check_capacity(needed, buf)?;

        let mut dst = &mut buf[..];
        dst.put_u8(controlled as u8);
        dst.put_u8(uncontrolled as u8);
        dst.put_u8(brushless as u8);

        for motor in self.iter_controlled() {
            dst.put_u8(motor.id);
            dst.put_u8(motor.wanted_angle_position);
            dst.put_u8(motor.wanted_nb_turns);
            dst.put_u8(motor.flags());
        }
        for motor in self.iter_uncontrolled() {
            dst.put_u8(motor.id);
            dst.put_u8(motor.flags());
        }
        for device in self.iter_brushless() {
            dst.put_u8(device.id);
            dst.put_u8(device.on_off);
        }

        tracing::trace!(
            controlled,
            uncontrolled,
            brushless,
            len = needed,
            "encoded motor frame"
        );
        Ok(needed)
    }

    fn encoded_len(&self) -> usize {
        let (controlled, uncontrolled, brushless) = self.counts();
        motor_frame_size(controlled, uncontrolled, brushless)
    }
}

fn decode_motors(bytes: &[u8]) -> Result<MotorFrame> {
    if bytes.is_empty() {
        return Err(FrameError::EmptyInput);
    }
    check_header_present(bytes.len())?;

    let mut src = bytes;
    let nb_controlled = usize::from(src.get_u8());
    let nb_uncontrolled = usize::from(src.get_u8());
    let nb_brushless = usize::from(src.get_u8());

    check_length(
        FrameKind::Motor,
        motor_frame_size(nb_controlled, nb_uncontrolled, nb_brushless),
        bytes.len(),
    )?;
    slots::check_declared(DeviceCategory::Controlled, nb_controlled, MAX_CONTROLLED_MOTORS)?;
    slots::check_declared(
        DeviceCategory::Uncontrolled,
        nb_uncontrolled,
        MAX_UNCONTROLLED_MOTORS,
    )?;
    slots::check_declared(DeviceCategory::Brushless, nb_brushless, MAX_BRUSHLESS)?;

    let mut frame = MotorFrame::new();

    for index in 0..nb_controlled {
        let id = src.get_u8();
        slots::check_new_id(
            &frame.controlled_motors[..index],
            id,
            index,
            DeviceCategory::Controlled,
        )?;

        let motor = &mut frame.controlled_motors[index];
        motor.id = id;
        motor.wanted_angle_position = src.get_u8();
        motor.wanted_nb_turns = src.get_u8();
        let flags = src.get_u8();
        motor.finished = flags & FINISHED_BIT != 0;
        motor.new_command = flags & NEW_COMMAND_BIT != 0;
    }

    for index in 0..nb_uncontrolled {
        let id = src.get_u8();
        slots::check_new_id(
            &frame.uncontrolled_motors[..index],
            id,
            index,
            DeviceCategory::Uncontrolled,
        )?;

        let motor = &mut frame.uncontrolled_motors[index];
        motor.id = id;
        let flags = src.get_u8();
        motor.on_off = flags & ON_OFF_BIT != 0;
        motor.rotation = if flags & ROTATION_BIT != 0 {
            Rotation::CounterClockwise
        } else {
            Rotation::Clockwise
        };
    }

    for index in 0..nb_brushless {
        let id = src.get_u8();
        slots::check_new_id(
            &frame.brushless[..index],
            id,
            index,
            DeviceCategory::Brushless,
        )?;

        let device = &mut frame.brushless[index];
        device.id = id;
        device.on_off = src.get_u8();
    }

    Ok(frame)
}

fn check_header_present(len: usize) -> Result<()> {
    if len < MOTOR_HEADER_SIZE {
        return Err(FrameError::MalformedLength {
            kind: FrameKind::Motor,
            expected: MOTOR_HEADER_SIZE,
            actual: len,
        });
    }
    Ok(())
}
