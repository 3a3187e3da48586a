#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn robolink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_robolink"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("robolink should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn decode_servo_frame_as_json() {
    // id 5, position 256, command 10, speed command, white.
    let output = robolink(&["--format", "json", "decode", "servo", "01 05 0100 000a 27"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    assert_eq!(json["kind"], "servo");
    assert_eq!(json["len"], 7);
    let servo = &json["servos"][0];
    assert_eq!(servo["id"], 5);
    assert_eq!(servo["position"], 256);
    assert_eq!(servo["command"], 10);
    assert_eq!(servo["command_type"], "speed");
    assert_eq!(servo["blocked"], false);
    assert_eq!(servo["color"], "white");
}

#[test]
fn decode_malformed_frame_is_data_invalid() {
    let output = robolink(&["--format", "json", "decode", "servo", "02050100000a27"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed servo frame"), "stderr: {stderr}");
}

#[test]
fn decode_reserved_kind_is_data_invalid() {
    let output = robolink(&["decode", "moving", "00"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn decode_bad_hex_is_usage_error() {
    let output = robolink(&["decode", "io", "xyz"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn encode_motor_frame_then_decode_it() {
    let output = robolink(&[
        "--format",
        "json",
        "encode",
        "motor",
        "--json",
        r#"{"controlled":[{"id":2,"wanted_angle_position":90,"finished":true}],"uncontrolled":[{"id":3,"on_off":true}]}"#,
    ]);
    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["kind"], "motor");
    assert_eq!(json["len"], 9);
    let hex = json["hex"].as_str().expect("hex should be a string");
    assert_eq!(hex, "010100025a00020302");

    let output = robolink(&["--format", "json", "decode", "motor", hex]);
    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["controlled"][0]["wanted_angle_position"], 90);
    assert_eq!(json["uncontrolled"][0]["on_off"], true);
    assert_eq!(json["brushless"].as_array().map(Vec::len), Some(0));
}

#[test]
fn encode_raw_writes_wire_bytes() {
    let output = robolink(&["--format", "raw", "encode", "io", "--json", r#"{"tirette":1}"#]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, vec![1]);
}

#[test]
fn encode_duplicate_ids_is_data_invalid() {
    let output = robolink(&[
        "encode",
        "servo",
        "--json",
        r#"{"servos":[{"id":4},{"id":4}]}"#,
    ]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn size_reports_wire_length() {
    let output = robolink(&["--format", "raw", "size", "servo", "--servos", "8"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "49");

    let output = robolink(&[
        "--format",
        "json",
        "size",
        "motor",
        "--controlled",
        "1",
        "--uncontrolled",
        "1",
        "--brushless",
        "1",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["size"], 11);

    let output = robolink(&["size", "servo", "--servos", "9"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_prints_package_version() {
    let output = robolink(&["version"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("robolink "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn decode_io_reads_first_byte_only() {
    let output = robolink(&["--format", "json", "decode", "io", "0100"]);
    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["tirette"], 1);
    assert_eq!(json["tirette_inserted"], true);
}
