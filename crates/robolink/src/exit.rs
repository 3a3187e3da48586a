use std::fmt;
use std::io;

use robolink_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        // Buffers are sized from encoded_len, so this is a bug rather than bad input.
        FrameError::BufferTooSmall { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robolink_frame::FrameKind;

    #[test]
    fn frame_errors_are_data_invalid() {
        let err = frame_error("decode failed", FrameError::EmptyInput);
        assert_eq!(err.code, DATA_INVALID);
        assert_eq!(err.to_string(), "decode failed: empty frame");

        let err = frame_error(
            "decode failed",
            FrameError::Undefined {
                kind: FrameKind::Moving,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn buffer_errors_are_internal() {
        let err = frame_error(
            "encode failed",
            FrameError::BufferTooSmall {
                needed: 7,
                available: 1,
            },
        );
        assert_eq!(err.code, INTERNAL);
    }

    #[test]
    fn io_errors_map_by_kind() {
        let err = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code, PERMISSION_DENIED);
        let err = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, FAILURE);
    }
}
