//! Integration tests driving the `sfx` binary.
//!
//! Each test writes its input into a fresh temp directory and checks the
//! artifacts the command leaves behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn sfx_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sfx"))
}

fn run_sfx(args: &[&str], dir: &Path) -> Output {
    Command::new(sfx_binary())
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sfx")
}

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_sa_writes_one_index_per_line() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "banana\n");

    let output = run_sfx(&["sa", "input.txt"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let sa = fs::read_to_string(dir.path().join("output_sa.txt")).unwrap();
    assert_eq!(sa, "7\n6\n4\n2\n1\n5\n3\n");
}

#[test]
fn test_sa_ignores_line_breaks() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "ban\r\nana\n");

    let output = run_sfx(&["sa", "input.txt", "-o", "sa.txt"], dir.path());
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("sa.txt")).unwrap(),
        "7\n6\n4\n2\n1\n5\n3\n"
    );
}

#[test]
fn test_empty_input_fails() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "\n\n");

    let output = run_sfx(&["sa", "input.txt"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("output_sa.txt").exists());
}

#[test]
fn test_encode_then_decode() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "mississippi");

    let output = run_sfx(&["encode", "input.txt"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report = fs::read_to_string(dir.path().join("output_encode_bits.txt")).unwrap();
    let mut lines = report.lines();
    let bits = lines.next().unwrap();
    assert!(bits.chars().all(|c| c == '0' || c == '1'));
    assert_eq!(lines.next().unwrap(), format!("(Total bits: {})", bits.len()));

    let packed = fs::read(dir.path().join("output_encode.bin")).unwrap();
    assert_eq!(packed.len(), bits.len().div_ceil(8));

    let output = run_sfx(&["decode", "output_encode.bin"], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "mississippi$\n");
}

#[test]
fn test_encode_rejects_wide_symbols() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "caf\u{e9}");

    let output = run_sfx(&["encode", "input.txt"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_fib_codes() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "numbers.txt", "1\n2\n3\n4\n65\n");

    let output = run_sfx(&["fib", "numbers.txt"], dir.path());
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("output_fib.txt")).unwrap(),
        "11\n011\n0011\n1011\n0100100011\n"
    );
}

#[test]
fn test_missing_input_is_not_an_input_error() {
    let dir = tempdir().unwrap();
    let output = run_sfx(&["sa", "missing.txt"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_fib_accepts_u64_max() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "numbers.txt", "18446744073709551615\n");

    let output = run_sfx(&["fib", "numbers.txt"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let codes = fs::read_to_string(dir.path().join("output_fib.txt")).unwrap();
    assert!(codes.trim_end().ends_with("11"));
}

#[test]
fn test_fib_rejects_zero() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "numbers.txt", "5\n0\n");

    let output = run_sfx(&["fib", "numbers.txt"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_prime_is_reproducible_with_seed() {
    let dir = tempdir().unwrap();

    let first = run_sfx(&["prime", "100", "--seed", "5", "-o", "a.txt"], dir.path());
    let second = run_sfx(&["prime", "100", "--seed", "5", "-o", "b.txt"], dir.path());
    assert!(first.status.success() && second.status.success());

    let a = fs::read_to_string(dir.path().join("a.txt")).unwrap();
    let b = fs::read_to_string(dir.path().join("b.txt")).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.trim_end().len(), 100);
}

#[test]
fn test_prime_rejects_small_digit_counts() {
    let dir = tempdir().unwrap();
    let output = run_sfx(&["prime", "50"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_stats_json() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "banana");

    let output = run_sfx(&["stats", "input.txt", "--json", "--verify"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tree"]["leaf_count"], 7);
    assert_eq!(report["tree"]["internal_count"], 4);
    assert_eq!(report["bwt_runs"], 5);
}

#[test]
fn test_config_changes_sentinel() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "banana");
    write_input(dir.path(), "config.json", r##"{ "sentinel": 35 }"##);

    let output = run_sfx(&["--config", "config.json", "sa", "input.txt"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    // '#' sorts before the letters just like '$'
    assert_eq!(
        fs::read_to_string(dir.path().join("output_sa.txt")).unwrap(),
        "7\n6\n4\n2\n1\n5\n3\n"
    );
}

#[test]
fn test_stats_without_encodable_alphabet() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "caf\u{e9}");

    let output = run_sfx(&["stats", "input.txt", "--json"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // "caf" + two UTF-8 bytes + sentinel
    assert_eq!(report["tree"]["leaf_count"], 6);
    assert!(report["encoding"].is_null());
}

#[test]
fn test_encode_reports_padding() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "input.txt", "banana");

    let output = run_sfx(&["encode", "input.txt"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("padding"), "{stdout}");
}
