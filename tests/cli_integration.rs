use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_oxiz85").to_string()
}

#[test]
fn cli_encode_decode_roundtrip_framed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let encoded = dir.path().join("input.z85");
    let output = dir.path().join("output.bin");

    std::fs::write(&input, b"an odd-length payload!").unwrap();

    let st = Command::new(bin())
        .arg("--force")
        .args(["encode", "--framed"])
        .arg(&input)
        .arg(&encoded)
        .status()
        .unwrap();
    assert!(st.success());

    let st = Command::new(bin())
        .arg("--force")
        .args(["decode", "--framed"])
        .arg(&encoded)
        .arg(&output)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(
        std::fs::read(&output).unwrap(),
        std::fs::read(&input).unwrap()
    );
}

#[test]
fn cli_raw_stdin_to_stdout() {
    let mut child = Command::new(bin())
        .arg("decode")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"HelloWorld\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B]);
}

#[test]
fn cli_raw_encode_rejects_odd_length() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    std::fs::write(&input, b"foo bar").unwrap();

    let out = Command::new(bin())
        .args(["encode", "--stdout"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("wrong input length"));
}

#[test]
fn cli_failed_decode_leaves_no_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.z85");
    let output = dir.path().join("out.bin");
    std::fs::write(&input, b"HelloWorl").unwrap();

    let st = Command::new(bin())
        .arg("decode")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(!st.success());
    assert!(!output.exists());

    // A later run needs no --force.
    std::fs::write(&input, b"HelloWorld").unwrap();
    let st = Command::new(bin())
        .arg("decode")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read(&output).unwrap().len(), 8);
}

#[test]
fn cli_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let output = dir.path().join("out.z85");
    std::fs::write(&input, b"abcd").unwrap();
    std::fs::write(&output, b"existing").unwrap();

    let st = Command::new(bin())
        .arg("encode")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read(&output).unwrap(), b"existing");
}

#[test]
fn cli_json_stats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    std::fs::write(&input, b"abc").unwrap();

    let out = Command::new(bin())
        .args(["--json", "encode", "--framed", "-c"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, b"17tUG\n");
    let stats: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(stats["command"], "encode");
    assert_eq!(stats["input_size"], 3);
    assert_eq!(stats["output_size"], 5);
}

#[test]
fn cli_config_works() {
    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
}
