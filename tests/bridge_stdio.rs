//! End-to-end: drive the compiled binary over its standard streams.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const SCENARIO: &str = r#"{"source": "import os\nos.getcwd()", "path": "a.py", "line": 2, "column": 0}"#;

fn run_bridge(input: &str) -> (Vec<String>, std::process::ExitStatus) {
    // A scratch working directory keeps any project config out of the way.
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hover-bridge"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    (stdout.lines().map(str::to_string).collect(), output.status)
}

#[test]
fn module_scenario() {
    let (lines, status) = run_bridge(&format!("{SCENARIO}\n"));
    assert!(status.success());
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with(r#"{"name": "os", "full_name": "os", "type": "module", "docstring": ""#),
        "{}",
        lines[0]
    );
    assert!(lines[0].ends_with(r#", "module_name": "os"}"#), "{}", lines[0]);
}

#[test]
fn malformed_line_keeps_the_loop_alive() {
    let (lines, status) = run_bridge(&format!("not json\n{SCENARIO}\n\n"));
    assert!(status.success());
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(r#"{"error": ""#));
    assert!(lines[1].contains(r#""name": "os""#));
    assert!(lines[2].starts_with(r#"{"error": ""#));
}

#[test]
fn closed_input_exits_quietly() {
    let (lines, status) = run_bridge("");
    assert!(status.success());
    assert!(lines.is_empty());
}

#[test]
fn nothing_under_cursor_is_null() {
    let req = r##"{"source": "# just a comment\n", "path": "a.py", "line": 1, "column": 3}"##;
    let (lines, _) = run_bridge(&format!("{req}\n"));
    assert_eq!(lines, vec!["null"]);
}

#[test]
fn zero_based_lines_from_the_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hover-bridge"))
        .args(["--line-base", "0"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let req = r#"{"source": "import os\nos.getcwd()", "path": "a.py", "line": 1, "column": 0}"#;
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!("{req}\n").as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"{"name": "os""#), "{stdout}");
}

#[test]
fn invalid_base_fails_at_startup() {
    let status = Command::new(env!("CARGO_BIN_EXE_hover-bridge"))
        .args(["--column-base", "3"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn deeply_nested_source_does_not_end_the_loop() {
    let nested = format!("{}1{}", "[".repeat(10_000), "]".repeat(10_000));
    let deep = format!(
        r#"{{"source": "x = {nested}\nx", "path": "a.py", "line": 2, "column": 0}}"#
    );
    let (lines, status) = run_bridge(&format!("{deep}\n{SCENARIO}\n"));
    assert!(status.success());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(r#"{"name": "list""#), "{}", lines[0]);
    assert!(lines[1].starts_with(r#"{"name": "os""#), "{}", lines[1]);
}

#[test]
fn each_response_arrives_while_input_stays_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hover-bridge"))
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();

    let (tx, rx) = mpsc::channel();
    let reader = thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    for round in 0..2 {
        writeln!(stdin, "{SCENARIO}").unwrap();
        stdin.flush().unwrap();
        match rx.recv_timeout(Duration::from_secs(10)) {
            Ok(line) => assert!(line.starts_with(r#"{"name": "os""#), "{line}"),
            Err(e) => {
                let _ = child.kill();
                panic!("no response to request {round} while stdin is open: {e}");
            }
        }
    }

    drop(stdin);
    assert!(child.wait().unwrap().success());
    reader.join().unwrap();
}
