use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use robolink_frame::FrameKind;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod size;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a frame and print its records.
    Decode(DecodeArgs),
    /// Build a frame from a JSON description.
    Encode(EncodeArgs),
    /// Print the wire size implied by record counts.
    Size(SizeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Size(args) => size::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Servo,
    Motor,
    Io,
    Avoidance,
    Moving,
}

impl From<KindArg> for FrameKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Servo => FrameKind::Servo,
            KindArg::Motor => FrameKind::Motor,
            KindArg::Io => FrameKind::Io,
            KindArg::Avoidance => FrameKind::Avoidance,
            KindArg::Moving => FrameKind::Moving,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame kind.
    pub kind: KindArg,
    /// Frame bytes as hex (spaces, ':' and a 0x prefix are accepted).
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw frame bytes from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Frame kind.
    pub kind: KindArg,
    /// JSON description of the records.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON description from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Frame kind.
    pub kind: KindArg,
    /// Number of servos (servo frames).
    #[arg(long, default_value = "0")]
    pub servos: usize,
    /// Number of controlled motors (motor frames).
    #[arg(long, default_value = "0")]
    pub controlled: usize,
    /// Number of uncontrolled motors (motor frames).
    #[arg(long, default_value = "0")]
    pub uncontrolled: usize,
    /// Number of brushless devices (motor frames).
    #[arg(long, default_value = "0")]
    pub brushless: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
