use robolink_frame::{
    motor_frame_size, servo_frame_size, DeviceCategory, FrameKind, IO_FRAME_SIZE, MAX_BRUSHLESS,
    MAX_CONTROLLED_MOTORS, MAX_SERVOS, MAX_UNCONTROLLED_MOTORS,
};
use serde::Serialize;

use crate::cmd::SizeArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct SizeOutput {
    kind: &'static str,
    size: usize,
}

pub fn run(args: SizeArgs, format: OutputFormat) -> CliResult<i32> {
    let kind: FrameKind = args.kind.into();
    let size = frame_size(kind, &args)?;

    match format {
        OutputFormat::Json => {
            let out = SizeOutput {
                kind: kind.as_str(),
                size,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => println!("{kind}: {size} bytes"),
        OutputFormat::Raw => println!("{size}"),
    }
    Ok(SUCCESS)
}

fn frame_size(kind: FrameKind, args: &SizeArgs) -> CliResult<usize> {
    match kind {
        FrameKind::Servo => {
            check_count(DeviceCategory::Servo, args.servos, MAX_SERVOS)?;
            Ok(servo_frame_size(args.servos))
        }
        FrameKind::Motor => {
            check_count(DeviceCategory::Controlled, args.controlled, MAX_CONTROLLED_MOTORS)?;
            check_count(
                DeviceCategory::Uncontrolled,
                args.uncontrolled,
                MAX_UNCONTROLLED_MOTORS,
            )?;
            check_count(DeviceCategory::Brushless, args.brushless, MAX_BRUSHLESS)?;
            Ok(motor_frame_size(
                args.controlled,
                args.uncontrolled,
                args.brushless,
            ))
        }
        FrameKind::Io => Ok(IO_FRAME_SIZE),
        FrameKind::Avoidance | FrameKind::Moving => Ok(0),
    }
}

fn check_count(category: DeviceCategory, count: usize, capacity: usize) -> CliResult<()> {
    if count > capacity {
        return Err(CliError::new(
            USAGE,
            format!("at most {capacity} {category} records fit in a frame (got {count})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::KindArg;

    fn args(kind: KindArg) -> SizeArgs {
        SizeArgs {
            kind,
            servos: 0,
            controlled: 0,
            uncontrolled: 0,
            brushless: 0,
        }
    }

    #[test]
    fn sizes_per_kind() {
        let mut servo = args(KindArg::Servo);
        servo.servos = 3;
        assert_eq!(frame_size(FrameKind::Servo, &servo).unwrap(), 19);

        let mut motor = args(KindArg::Motor);
        motor.controlled = 1;
        motor.brushless = 2;
        assert_eq!(frame_size(FrameKind::Motor, &motor).unwrap(), 11);

        assert_eq!(frame_size(FrameKind::Io, &args(KindArg::Io)).unwrap(), 1);
        assert_eq!(
            frame_size(FrameKind::Moving, &args(KindArg::Moving)).unwrap(),
            0
        );
    }

    #[test]
    fn counts_above_capacity_are_usage_errors() {
        let mut servo = args(KindArg::Servo);
        servo.servos = 9;
        assert_eq!(frame_size(FrameKind::Servo, &servo).unwrap_err().code, USAGE);
    }
}
