use std::fs;

use robolink_frame::Frame;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = resolve_input(&args)?;
    let frame = Frame::decode(args.kind.into(), &bytes)
        .map_err(|err| frame_error("decode failed", err))?;

    tracing::info!(kind = %frame.kind(), len = bytes.len(), "decoded frame");
    print_frame(&frame, format)?;
    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    match &args.hex {
        Some(text) => parse_hex(text),
        None => Err(CliError::new(USAGE, "provide frame bytes as HEX or --file")),
    }
}

pub(crate) fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    hex::decode(&digits).map_err(|err| CliError::new(USAGE, format!("invalid hex: {err}")))
}
