//! End-to-end smoke tests for the chatlift binary.

use assert_cmd::Command;
use predicates::prelude::*;

const CLAUDE_PAGE: &str = r#"<html><body>
  <div class="font-user-message">Hello</div>
  <div class="font-claude-message"><div>World</div></div>
</body></html>"#;

fn chatlift() -> Command {
    Command::cargo_bin("chatlift").expect("binary built")
}

#[test]
fn extracts_a_claude_page_to_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("claude.html");
    std::fs::write(&page, CLAUDE_PAGE).unwrap();
    let out = dir.path().join("out");

    chatlift()
        .arg(&page)
        .arg("--url")
        .arg("https://claude.ai/chat/abc")
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().into_string().unwrap();
    assert!(name.starts_with("conversation_") && name.ends_with(".md"), "{name}");

    let body = std::fs::read_to_string(entries[0].path()).unwrap();
    assert!(body.starts_with("# Conversation extracted from https://claude.ai/chat/abc\n"));
    assert!(body.contains("## User:\nHello\n\n"));
    assert!(body.contains("## AI:\nWorld\n\n"));
}

#[test]
fn unsupported_page_exits_with_validation_code() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("blank.html");
    std::fs::write(&page, "<html><body><p>nothing</p></body></html>").unwrap();

    chatlift()
        .arg(&page)
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "No messages found in the conversation.",
        ));
}

#[test]
fn detect_prints_the_platform() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("claude.html");
    std::fs::write(&page, CLAUDE_PAGE).unwrap();

    chatlift()
        .arg(&page)
        .arg("--detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude"));
}

#[test]
fn json_mode_emits_the_protocol_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("claude.html");
    std::fs::write(&page, CLAUDE_PAGE).unwrap();

    chatlift()
        .arg(&page)
        .arg("--json")
        .arg("--format")
        .arg("plaintext")
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"messageCount\": 2"))
        .stdout(predicate::str::contains("\"downloadInitiated\": true"));
}

#[test]
fn missing_page_is_an_input_error_with_a_hint() {
    chatlift()
        .arg("/nonexistent/page.html")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read page"))
        .stderr(predicate::str::contains(
            "make sure this is a saved ChatGPT, Claude, or Poe page",
        ));
}
