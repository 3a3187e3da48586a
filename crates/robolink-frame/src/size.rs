//! Capacities and frame-size formulas shared by the codecs.
//!
//! Callers use these to pre-size buffers before encoding.

/// Maximum number of servo records in a servo frame.
pub const MAX_SERVOS: usize = 8;

/// Maximum number of controlled motors in a motor frame.
pub const MAX_CONTROLLED_MOTORS: usize = 8;

/// Maximum number of uncontrolled motors in a motor frame.
pub const MAX_UNCONTROLLED_MOTORS: usize = 8;

/// Maximum number of brushless devices in a motor frame.
pub const MAX_BRUSHLESS: usize = 8;

/// Servo frame header: the record count.
pub const SERVO_HEADER_SIZE: usize = 1;

/// `id, position (2), command (2), flags`.
pub const SERVO_RECORD_SIZE: usize = 6;

/// Motor frame header: one count per category.
pub const MOTOR_HEADER_SIZE: usize = 3;

/// `id, wanted_angle, wanted_turns, flags`.
pub const CONTROLLED_RECORD_SIZE: usize = 4;

/// `id, flags`.
pub const UNCONTROLLED_RECORD_SIZE: usize = 2;

/// `id, on_off`.
pub const BRUSHLESS_RECORD_SIZE: usize = 2;

/// IO frame: the start-cord byte.
pub const IO_FRAME_SIZE: usize = 1;

/// Wire size of a servo frame carrying `nb_servos` records.
pub const fn servo_frame_size(nb_servos: usize) -> usize {
    SERVO_HEADER_SIZE + nb_servos * SERVO_RECORD_SIZE
}

/// Wire size of a motor frame with the given category counts.
pub const fn motor_frame_size(controlled: usize, uncontrolled: usize, brushless: usize) -> usize {
    MOTOR_HEADER_SIZE
        + controlled * CONTROLLED_RECORD_SIZE
        + uncontrolled * UNCONTROLLED_RECORD_SIZE
        + brushless * BRUSHLESS_RECORD_SIZE
}

/// Largest servo frame the protocol can carry.
pub const MAX_SERVO_FRAME_SIZE: usize = servo_frame_size(MAX_SERVOS);

/// Largest motor frame the protocol can carry.
pub const MAX_MOTOR_FRAME_SIZE: usize =
    motor_frame_size(MAX_CONTROLLED_MOTORS, MAX_UNCONTROLLED_MOTORS, MAX_BRUSHLESS);
