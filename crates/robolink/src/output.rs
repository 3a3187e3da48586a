use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use robolink_frame::{
    Brushless, ControlledMotor, DeviceCategory, Frame, FrameKind, Servo, UncontrolledMotor,
};
use serde::Serialize;

use crate::exit::{frame_error, CliResult};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    kind: &'static str,
    len: usize,
    #[serde(flatten)]
    records: RecordsOutput<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RecordsOutput<'a> {
    Servo {
        servos: Vec<&'a Servo>,
    },
    Motor {
        controlled: Vec<&'a ControlledMotor>,
        uncontrolled: Vec<&'a UncontrolledMotor>,
        brushless: Vec<&'a Brushless>,
    },
    Io {
        tirette: u8,
        tirette_inserted: bool,
    },
    Reserved {},
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    kind: &'static str,
    len: usize,
    hex: &'a str,
}

/// One populated record, flattened for the table and pretty renderers.
struct RecordRow {
    category: &'static str,
    id: String,
    fields: String,
}

pub fn print_frame(frame: &Frame, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                kind: frame.kind().as_str(),
                len: frame.encoded_len(),
                records: records_output(frame),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CATEGORY", "ID", "FIELDS"]);
            for row in record_rows(frame) {
                table.add_row(vec![row.category.to_string(), row.id, row.fields]);
            }
            println!("{} frame, {} bytes", frame.kind(), frame.encoded_len());
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("kind={} len={}", frame.kind(), frame.encoded_len());
            for row in record_rows(frame) {
                println!("  {} id={} {}", row.category, row.id, row.fields);
            }
        }
        OutputFormat::Raw => {
            let bytes = frame
                .to_bytes()
                .map_err(|err| frame_error("encode failed", err))?;
            print_raw(&bytes);
        }
    }
    Ok(())
}

pub fn print_encoded(kind: FrameKind, bytes: &[u8], format: OutputFormat) {
    let encoded = hex::encode(bytes);
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                kind: kind.as_str(),
                len: bytes.len(),
                hex: &encoded,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KIND", "LEN", "HEX"])
                .add_row(vec![kind.to_string(), bytes.len().to_string(), encoded]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", spaced_hex(bytes)),
        OutputFormat::Raw => print_raw(bytes),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn records_output(frame: &Frame) -> RecordsOutput<'_> {
    match frame {
        Frame::Servo(servos) => RecordsOutput::Servo {
            servos: servos.iter().collect(),
        },
        Frame::Motor(motors) => RecordsOutput::Motor {
            controlled: motors.iter_controlled().collect(),
            uncontrolled: motors.iter_uncontrolled().collect(),
            brushless: motors.iter_brushless().collect(),
        },
        Frame::Io(io) => RecordsOutput::Io {
            tirette: io.tirette,
            tirette_inserted: io.is_tirette_inserted(),
        },
        Frame::Avoidance(_) | Frame::Moving(_) => RecordsOutput::Reserved {},
    }
}

fn record_rows(frame: &Frame) -> Vec<RecordRow> {
    match frame {
        Frame::Servo(servos) => servos
            .iter()
            .map(|s| RecordRow {
                category: DeviceCategory::Servo.as_str(),
                id: s.id.to_string(),
                fields: format!(
                    "position={} command={} type={} blocked={} mode={} color={}",
                    s.position,
                    s.command,
                    s.command_type.as_str(),
                    s.blocked,
                    s.blocking_mode.as_str(),
                    s.color.as_str()
                ),
            })
            .collect(),
        Frame::Motor(motors) => {
            let controlled = motors.iter_controlled().map(|m| RecordRow {
                category: DeviceCategory::Controlled.as_str(),
                id: m.id.to_string(),
                fields: format!(
                    "angle={} turns={} finished={} new_command={}",
                    m.wanted_angle_position, m.wanted_nb_turns, m.finished, m.new_command
                ),
            });
            let uncontrolled = motors.iter_uncontrolled().map(|m| RecordRow {
                category: DeviceCategory::Uncontrolled.as_str(),
                id: m.id.to_string(),
                fields: format!("on={} rotation={}", m.on_off, m.rotation.as_str()),
            });
            let brushless = motors.iter_brushless().map(|b| RecordRow {
                category: DeviceCategory::Brushless.as_str(),
                id: b.id.to_string(),
                fields: format!("on_off={}", b.on_off),
            });
            controlled.chain(uncontrolled).chain(brushless).collect()
        }
        Frame::Io(io) => vec![RecordRow {
            category: "io",
            id: "-".to_string(),
            fields: format!(
                "tirette={} ({})",
                io.tirette,
                if io.is_tirette_inserted() {
                    "inserted"
                } else {
                    "pulled"
                }
            ),
        }],
        Frame::Avoidance(_) | Frame::Moving(_) => Vec::new(),
    }
}
