use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfn").unwrap();
    cmd.timeout(Duration::from_secs(5))
        .env_remove("BFN_CONFIG")
        .env_remove("BFN_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/bfn-test-config");
    cmd
}

#[test]
fn test_unmatched_closing_bracket() {
    cargo_bin()
        .args(["run", "++]"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Brainfunc UnmatchedBracketError @ 1:3:"))
        .stderr(predicate::str::contains("    ++]\n      ^\n"))
        .stderr(predicate::str::contains(
            "Closing bracket ']' not matched with opening bracket '['",
        ));
}

#[test]
fn test_unclosed_loop() {
    cargo_bin()
        .args(["run", "[+"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("UnmatchedBracketError @ 1:1:"));
}

#[test]
fn test_break_outside_loop() {
    cargo_bin()
        .args(["run", "~"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BreakOutOfLoopError"))
        .stderr(predicate::str::contains("Used break outside of loop"));
}

#[test]
fn test_undefined_function() {
    cargo_bin()
        .args(["run", "(nope)"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FunctionNotDefinedError"))
        .stderr(predicate::str::contains("Function 'nope' not defined"));
}

#[test]
fn test_invalid_function_name_suggests_fix() {
    cargo_bin()
        .args(["run", "$bad name{+}"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("InvalidFunctionNameError"))
        .stderr(predicate::str::contains("consider using 'bad_name'"));
}

#[test]
fn test_output_before_error_is_kept() {
    cargo_bin()
        .args(["run", "+:]"])
        .assert()
        .code(1)
        .stdout("1\n");
}

#[test]
fn test_strict_ascii_rejects_large_values() {
    cargo_bin()
        .args(["run", "++++++++++++++++[>++++++++++++++++<-]>."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NotASCIIError"))
        .stderr(predicate::str::contains("Number 256 does not represent an ASCII character"));
}

#[test]
fn test_lenient_prints_code_points() {
    // 16 * 16 + 1 = 257 = U+0101
    cargo_bin()
        .args(["--lenient", "run", "++++++++++++++++[>++++++++++++++++<-]>+."])
        .assert()
        .success()
        .stdout("\u{101}\n");
}

#[test]
fn test_presets_can_be_disabled() {
    cargo_bin()
        .args(["--no-presets", "run", "(pushR)"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Function 'pushR' not defined"));
}

#[test]
fn test_echo_unknown_copies_text() {
    cargo_bin()
        .args(["--echo-unknown", "run", "hi+:"])
        .assert()
        .success()
        .stdout("hi1\n");
}
