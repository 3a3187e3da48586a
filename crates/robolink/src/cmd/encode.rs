use std::fs;

use robolink_frame::{
    AvoidanceFrame, Brushless, ControlledMotor, Frame, FrameKind, IoFrame, MotorFrame,
    MovingFrame, Servo, ServoFrame, UncontrolledMotor,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_encoded, OutputFormat};

#[derive(Deserialize, Default, Debug)]
#[serde(default, deny_unknown_fields)]
struct ServoInput {
    servos: Vec<Servo>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default, deny_unknown_fields)]
struct MotorInput {
    controlled: Vec<ControlledMotor>,
    uncontrolled: Vec<UncontrolledMotor>,
    brushless: Vec<Brushless>,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let json = resolve_json(&args)?;
    let frame = build_frame(args.kind.into(), &json)?;
    let bytes = frame
        .to_bytes()
        .map_err(|err| frame_error("encode failed", err))?;

    if bytes.is_empty() {
        tracing::warn!(kind = %frame.kind(), "frame kind has no wire format; nothing encoded");
    } else {
        tracing::info!(kind = %frame.kind(), len = bytes.len(), "encoded frame");
    }

    print_encoded(frame.kind(), &bytes, format);
    Ok(SUCCESS)
}

fn resolve_json(args: &EncodeArgs) -> CliResult<String> {
    if let Some(json) = &args.json {
        return Ok(json.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok("{}".to_string())
}

fn build_frame(kind: FrameKind, json: &str) -> CliResult<Frame> {
    match kind {
        FrameKind::Servo => {
            let input: ServoInput = parse_json(json)?;
            let mut frame = ServoFrame::new();
            for servo in input.servos {
                frame
                    .push(servo)
                    .map_err(|err| frame_error("invalid servo list", err))?;
            }
            Ok(frame.into())
        }
        FrameKind::Motor => {
            let input: MotorInput = parse_json(json)?;
            let mut frame = MotorFrame::new();
            for motor in input.controlled {
                frame
                    .push_controlled(motor)
                    .map_err(|err| frame_error("invalid motor list", err))?;
            }
            for motor in input.uncontrolled {
                frame
                    .push_uncontrolled(motor)
                    .map_err(|err| frame_error("invalid motor list", err))?;
            }
            for device in input.brushless {
                frame
                    .push_brushless(device)
                    .map_err(|err| frame_error("invalid motor list", err))?;
            }
            Ok(frame.into())
        }
        FrameKind::Io => {
            let frame: IoFrame = parse_json(json)?;
            Ok(frame.into())
        }
        FrameKind::Avoidance => Ok(Frame::Avoidance(AvoidanceFrame::default())),
        FrameKind::Moving => Ok(Frame::Moving(MovingFrame::default())),
    }
}

fn parse_json<T: DeserializeOwned>(json: &str) -> CliResult<T> {
    serde_json::from_str(json).map_err(|err| CliError::new(USAGE, format!("invalid JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::DATA_INVALID;
    use robolink_frame::FrameCodec;

    #[test]
    fn servo_list_keeps_input_order() {
        let frame = build_frame(
            FrameKind::Servo,
            r#"{"servos":[{"id":9,"position":1},{"id":2,"color":"white"}]}"#,
        )
        .unwrap();
        let Frame::Servo(servos) = frame else {
            panic!("expected servo frame");
        };
        let ids: Vec<u8> = servos.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![9, 2]);
    }

    #[test]
    fn motor_ids_may_repeat_across_lists() {
        let frame = build_frame(
            FrameKind::Motor,
            r#"{"controlled":[{"id":1}],"brushless":[{"id":1,"on_off":1}]}"#,
        )
        .unwrap();
        assert_eq!(frame.to_bytes().unwrap().as_ref(), &[1, 0, 1, 1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn duplicate_or_zero_ids_are_data_invalid() {
        let err = build_frame(FrameKind::Servo, r#"{"servos":[{"id":3},{"id":3}]}"#)
            .unwrap_err();
        assert_eq!(err.code, DATA_INVALID);

        let err = build_frame(FrameKind::Motor, r#"{"uncontrolled":[{"id":0}]}"#).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn unknown_fields_are_usage_errors() {
        let err = build_frame(FrameKind::Servo, r#"{"motors":[]}"#).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn reserved_kinds_encode_nothing() {
        let frame = build_frame(FrameKind::Avoidance, "{}").unwrap();
        assert!(frame.to_bytes().unwrap().is_empty());
    }

    #[test]
    fn io_defaults_to_pulled_cord() {
        let frame = build_frame(FrameKind::Io, "{}").unwrap();
        assert_eq!(frame, Frame::Io(IoFrame::new(0)));
        let Frame::Io(io) = frame else {
            panic!("expected io frame");
        };
        assert_eq!(io.to_bytes().unwrap().as_ref(), &[0]);
    }
}
