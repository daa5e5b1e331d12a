//! CLI tests for the offline commands (`first-link`, `init-config`) and
//! early failures of `batch`.
//!
//! Spawns the wikigame binary and verifies output and exit codes without any
//! network access.

use std::fs;
use std::process::Command;

use wikigame::exit_codes;
use wikigame::test_support::article_html;

#[test]
fn first_link_prints_href() {
    let temp = tempfile::tempdir().expect("tempdir");
    let page = temp.path().join("rust.html");
    fs::write(
        &page,
        article_html(
            "Rust",
            r#"<p><b>Rust</b> (<a href="/wiki/Help:IPA">/rʌst/</a>) is an <a href="/wiki/Iron_oxide">iron oxide</a>.</p>"#,
        ),
    )
    .expect("write page");

    let output = Command::new(env!("CARGO_BIN_EXE_wikigame"))
        .arg("first-link")
        .arg(&page)
        .output()
        .expect("wikigame first-link");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "/wiki/Iron_oxide");
}

#[test]
fn first_link_without_candidates_exits_with_no_link() {
    let temp = tempfile::tempdir().expect("tempdir");
    let page = temp.path().join("empty.html");
    fs::write(&page, article_html("Empty", "<p>(all <a href=\"/wiki/Aside\">aside</a>)</p>"))
        .expect("write page");

    let status = Command::new(env!("CARGO_BIN_EXE_wikigame"))
        .arg("first-link")
        .arg(&page)
        .status()
        .expect("wikigame first-link");

    assert_eq!(status.code(), Some(exit_codes::NO_LINK));
}

#[test]
fn invalid_config_exits_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("wikigame.toml");
    fs::write(&config, "max_steps = 0\n").expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_wikigame"))
        .current_dir(temp.path())
        .args(["batch", "--input", "input.txt", "--output", "output.txt"])
        .output()
        .expect("wikigame batch");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_steps"));
}

#[test]
fn missing_batch_input_exits_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_wikigame"))
        .current_dir(temp.path())
        .args(["batch", "--input", "missing.txt", "--output", "output.txt"])
        .output()
        .expect("wikigame batch");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.txt"));
    assert!(!temp.path().join("output.txt").exists());
}

#[test]
fn init_config_writes_defaults_once() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("wikigame.toml");

    let first = Command::new(env!("CARGO_BIN_EXE_wikigame"))
        .arg("--config")
        .arg(&config)
        .arg("init-config")
        .status()
        .expect("wikigame init-config");
    assert_eq!(first.code(), Some(exit_codes::OK));
    let written = fs::read_to_string(&config).expect("read config");
    assert!(written.contains("step_delay_ms = 500"));

    let second = Command::new(env!("CARGO_BIN_EXE_wikigame"))
        .arg("--config")
        .arg(&config)
        .arg("init-config")
        .output()
        .expect("wikigame init-config");
    assert_eq!(second.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}
