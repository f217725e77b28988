use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const SHIPPED: &str = include_str!("../../choice.json");

fn temp_config(label: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "rpsls-cli-{label}-{}-{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    std::fs::write(&path, contents).expect("write config");
    path
}

fn run_with_input(args: &[&str], config: &Path, input: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_rpsls");
    let mut child = Command::new(exe)
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    // Startup failures exit before reading, so the pipe may already be closed.
    let _ = child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input.as_bytes());
    child.wait_with_output().expect("wait for cli")
}

#[test]
fn cli_plays_a_round() {
    let config = temp_config("round", SHIPPED);
    let output = run_with_input(&["--seed", "1337"], &config, "Spock\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Enter your choice (rock, paper, scissors, spock, lizard): "));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    let computer = lines[0]
        .rsplit_once("Computer chose ")
        .map(|(_, name)| name)
        .expect("computer line");
    let expected = match computer {
        "spock" => "It's a tie!",
        "scissors" | "rock" => "You win!",
        _ => "You lose!",
    };
    assert_eq!(lines[1], expected);
}

#[test]
fn cli_seed_is_reproducible() {
    let config = temp_config("seed", SHIPPED);
    let first = run_with_input(&["--seed", "99"], &config, "rock\n");
    let second = run_with_input(&["--seed", "99"], &config, "rock\n");
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cli_rejects_unknown_choice() {
    let config = temp_config("invalid", SHIPPED);
    let output = run_with_input(&[], &config, "banana\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "Invalid choice, please enter one of the following: rock, paper, scissors, spock, lizard."
    ));
    assert!(!stdout.contains("Computer chose"));
}

#[test]
fn cli_fails_on_broken_config() {
    let config = temp_config(
        "broken",
        r#"{ "choices": [ { "name": "rock", "winsAgainst": ["banana"] } ] }"#,
    );
    let output = run_with_input(&[], &config, "rock\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("banana"));
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_fails_on_missing_config() {
    let config = std::env::temp_dir().join("rpsls-cli-definitely-missing.json");
    let output = run_with_input(&[], &config, "rock\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("loading choices from"));
}
