//! End-to-end tests for the fair-rps binary.
//!
//! Each test spawns the built binary, feeds stdin, and checks stdout and the
//! exit status.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_fair-rps");

/// Run the binary with the given arguments and stdin contents
fn run(args: &[&str], stdin: &str) -> Output {
    run_bytes(args, stdin.as_bytes())
}

fn run_bytes(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .env_remove("FAIR_RPS_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start fair-rps");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        // The binary may exit before reading everything
        let _ = pipe.write_all(stdin);
    }

    child.wait_with_output().expect("Failed to wait for fair-rps")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn field<'a>(lines: &'a [String], prefix: &str) -> &'a str {
    lines
        .iter()
        .find_map(|l| l.strip_prefix(prefix))
        .unwrap_or_else(|| panic!("no line starting with {:?} in {:?}", prefix, lines))
}

/// HMAC-SHA256 keyed with the key's hex text, as an external tool would compute it
fn hmac_hex(key_hex: &str, message: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key_hex.as_bytes()).unwrap();
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[test]
fn test_round_discloses_verifiable_key() {
    let output = run(&["rock", "paper", "scissors"], "2\n");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert!(lines[0].starts_with("HMAC: "));
    assert_eq!(field(&lines, "Your move: "), "paper");

    let published = field(&lines, "HMAC: ");
    let key = field(&lines, "HMAC key: ");
    let computer_move = field(&lines, "Computer move: ");
    assert_eq!(key.len(), 64);
    assert_eq!(hmac_hex(key, computer_move), published);

    let outcome = lines
        .iter()
        .find(|l| ["Player Wins", "Computer Wins", "Draw"].contains(&l.as_str()));
    assert!(outcome.is_some());
}

#[test]
fn test_hmac_printed_before_menu() {
    let output = run(&["rock", "paper", "scissors"], "0\n");
    let lines = stdout_lines(&output);

    assert!(lines[0].starts_with("HMAC: "));
    assert_eq!(lines[1], "Available moves:");
    assert_eq!(lines[2], "1 - rock");
    assert_eq!(lines[5], "0 - exit");
    assert_eq!(lines[6], "? - help");
}

#[test]
fn test_exit_reveals_nothing() {
    let output = run(&["rock", "paper", "scissors"], "0\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("HMAC key:"));
    assert!(!stdout.contains("Computer move:"));
}

#[test]
fn test_help_and_invalid_input_reprompt() {
    let output = run(&["rock", "paper", "scissors"], "?\nlizard\n9\n1\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Game Rules"));
    assert!(stdout.contains("| rock     | Draw | Lose  | Win      |"));
    assert!(stdout.contains("Invalid choice \"lizard\""));
    assert!(stdout.contains("Invalid choice 9, pick a move from 1 to 3"));
    assert!(stdout.contains("Your move: rock"));
}

#[test]
fn test_non_utf8_input_is_rejected_and_round_continues() {
    let output = run_bytes(&["rock", "paper", "scissors"], b"\xff\xfe\n1\n");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let rejected = lines
        .iter()
        .position(|l| l.starts_with("Invalid choice"))
        .expect("bad line should be rejected inline");
    let disclosed = lines
        .iter()
        .position(|l| l == "Your move: rock")
        .expect("round should continue to disclosure");
    assert!(rejected < disclosed);
    assert_eq!(field(&lines, "HMAC key: ").len(), 64);
}

#[test]
fn test_closed_input_ends_quietly() {
    let output = run(&["rock", "paper", "scissors"], "");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("HMAC key:"));
}

#[test]
fn test_duplicate_moves_rejected() {
    let output = run(&["rock", "rock", "scissors"], "1\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Moves must be unique"));
}

#[test]
fn test_even_move_count_rejected() {
    let output = run(&["a", "b", "c", "d"], "1\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("odd number"));
}

#[test]
fn test_too_few_moves_rejected() {
    let output = run(&["rock", "paper"], "");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_move_named_help_is_playable() {
    let output = run(&["help", "paper", "scissors"], "1\n");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines[2], "1 - help");
    assert_eq!(field(&lines, "Your move: "), "help");
}

#[test]
fn test_moves_starting_with_hyphen_are_playable() {
    let output = run(&["-a", "b", "c"], "1\n");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines[2], "1 - -a");
    assert_eq!(field(&lines, "Your move: "), "-a");
}

#[test]
fn test_hyphen_duplicates_get_configuration_error() {
    let output = run(&["-x", "-x", "y"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Moves must be unique"));
}

#[test]
fn test_json_disclosure() {
    let output = run(&["--json", "A", "B", "C", "D", "E"], "3\n");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let published = field(&lines, "HMAC: ").to_string();
    let disclosure: serde_json::Value = serde_json::from_str(lines.last().unwrap()).unwrap();

    assert_eq!(disclosure["player_move"], "C");
    assert_eq!(disclosure["hmac"], published.as_str());
    let key = disclosure["key"].as_str().unwrap();
    let computer_move = disclosure["computer_move"].as_str().unwrap();
    assert_eq!(hmac_hex(key, computer_move), published);
}

#[test]
fn test_verify_subcommand() {
    let key = "00".repeat(32);
    let tag = hmac_hex(&key, "rock");

    let ok = run(&["verify", "--key", &key, "--hmac", &tag, "rock"], "");
    assert!(ok.status.success());
    assert_eq!(stdout_lines(&ok), vec!["HMAC verified"]);

    let bad = run(&["verify", "--key", &key, "--hmac", &tag, "paper"], "");
    assert_eq!(bad.status.code(), Some(1));
    assert_eq!(stdout_lines(&bad), vec!["HMAC mismatch"]);
}

#[test]
fn test_verify_rejects_malformed_key() {
    let output = run(&["verify", "--key", "xyz", "--hmac", "00", "rock"], "");

    assert_eq!(output.status.code(), Some(2));
}
