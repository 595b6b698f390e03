/// Integration tests: conversation loading, config, and wire formatting together.
use std::io::Write;
use std::process::{Command, Stdio};

use chatwire_config::{Config, FormatConfig, SystemRole};
use chatwire_model::{formatter_from_config, parse_conversation, MessageFormatter, MAX_TOOL_CALL_ID_LEN};

const RESPONSES_ID: &str = "fc_0f0e50a1476a6c35006912c58dc9f8819192c25864eb16f07f";

fn conversation_jsonl() -> String {
    [
        r#"{"role":"system","content":"You are terse."}"#.to_string(),
        r#"{"role":"user","content":"What is in src?"}"#.to_string(),
        format!(
            r#"{{"role":"assistant","tool_calls":[{{"id":"{RESPONSES_ID}","type":"function","function":{{"name":"ls","arguments":"{{\"path\":\"src\"}}"}}}}]}}"#
        ),
        r#"{"role":"assistant","tool_calls":[{"id":"call_short","type":"function","function":{"name":"pwd","arguments":"{}"}}]}"#.to_string(),
        format!(r#"{{"role":"tool","tool_call_id":"{RESPONSES_ID}","content":"main.rs"}}"#),
        r#"{"role":"tool","tool_call_id":"call_short","content":"/work"}"#.to_string(),
    ]
    .join("\n")
}

#[test]
fn loaded_conversation_keeps_call_and_result_ids_in_sync() {
    let messages = parse_conversation(&conversation_jsonl()).unwrap();
    let wire = formatter_from_config(&Config::default()).format_messages(&messages);

    // system, user, coalesced assistant, two tool results
    assert_eq!(wire.len(), 5);
    let calls = wire[2]["tool_calls"].as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["id"].as_str().unwrap().len(), MAX_TOOL_CALL_ID_LEN);
    assert_eq!(calls[0]["id"], wire[3]["tool_call_id"]);
    assert_eq!(calls[1]["id"], "call_short");
    assert_eq!(wire[4]["tool_call_id"], "call_short");
    assert_eq!(calls[0]["function"]["arguments"], r#"{"path":"src"}"#);
}

#[test]
fn developer_role_config_applies_to_system_messages() {
    let cfg = FormatConfig { system_role: SystemRole::Developer, ..FormatConfig::default() };
    let messages = parse_conversation(&conversation_jsonl()).unwrap();
    let wire = MessageFormatter::new(&cfg).format_messages(&messages);
    assert_eq!(wire[0]["role"], "developer");
}

#[test]
fn every_wire_id_is_within_limit() {
    let messages = parse_conversation(&conversation_jsonl()).unwrap();
    let wire = MessageFormatter::default().format_messages(&messages);
    for m in &wire {
        if let Some(calls) = m["tool_calls"].as_array() {
            for c in calls {
                assert!(c["id"].as_str().unwrap().chars().count() <= MAX_TOOL_CALL_ID_LEN);
            }
        }
        if let Some(id) = m["tool_call_id"].as_str() {
            assert!(id.chars().count() <= MAX_TOOL_CALL_ID_LEN);
        }
    }
}

#[test]
fn config_defaults_are_valid() {
    let cfg = Config::default();
    assert_eq!(cfg.format.system_role, SystemRole::System);
    assert!(cfg.format.coalesce_tool_calls);
}

#[test]
fn explicit_config_file_is_loaded() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "[format]\nsystem_role = \"developer\"").unwrap();
    let cfg = chatwire_config::load(Some(f.path())).unwrap();
    assert_eq!(cfg.format.system_role, SystemRole::Developer);
}

#[test]
fn cli_format_reads_stdin_and_prints_wire_json() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chatwire"))
        .args(["format", "--no-coalesce"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(conversation_jsonl().as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let wire: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(wire.len(), 6);
    assert_eq!(wire[2]["tool_calls"][0]["id"], &RESPONSES_ID[..40]);
    assert_eq!(wire[4]["tool_call_id"], &RESPONSES_ID[..40]);
}

#[test]
fn cli_normalize_id_prints_one_per_line() {
    let output = Command::new(env!("CARGO_BIN_EXE_chatwire"))
        .args(["normalize-id", RESPONSES_ID, "call_abc123def456"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![&RESPONSES_ID[..40], "call_abc123def456"]);
}

#[test]
fn cli_format_rejects_tool_message_without_id() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, r#"[{{"role":"tool","content":"orphan"}}]"#).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_chatwire"))
        .arg("format")
        .arg(f.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tool_call_id"), "{stderr}");
}
