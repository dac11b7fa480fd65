use serial_test::serial;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread::JoinHandle;

fn callboard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_callboard"))
        .args(args)
        .env_remove("CALLBOARD_STORE_URL")
        .env_remove("CALLBOARD_STORE_KEY")
        .env_remove("CALLBOARD_STORE_KIND")
        .env("RUST_LOG", "warn")
        .output()
        .expect("run callboard")
}

fn write_config(dir: &Path, body: &str) -> String {
    let path = dir.join("callboard.toml");
    std::fs::write(&path, body).expect("write config");
    path.to_string_lossy().to_string()
}

#[test]
#[serial]
fn show_marks_the_default_slot() {
    let output = callboard(&["--memory", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Editable slot: Calls at 11:00"));
    assert!(stdout.contains("* 11:00\t340"));
    assert!(stdout.contains("  09:00\t120"));
}

#[test]
#[serial]
fn show_honours_configured_slot() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[dashboard]\nslot_index = 6\n");
    let output = callboard(&["--config", &config, "--memory", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("* 15:00\t450"));
}

#[test]
#[serial]
fn out_of_range_slot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[dashboard]\nslot_index = 7\n");
    let output = callboard(&["--config", &config, "--memory", "show"]);
    assert!(!output.status.success());
}

#[test]
#[serial]
fn edit_with_memory_store_updates_slot() {
    let output = callboard(&["--memory", "edit", "--email", "a@b.co", "--value", "500"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved Calls at 11:00 = 500"));
    assert!(stdout.contains("* 11:00\t500"));
}

#[test]
#[serial]
fn edit_rejects_email_without_at() {
    let output = callboard(&["--memory", "edit", "--email", "abc", "--value", "500"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a valid email."));
}

#[test]
#[serial]
fn edit_rejects_non_numeric_value() {
    let output = callboard(&["--memory", "edit", "--email", "a@b.co", "--value", "abc"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a valid number"));
}

#[test]
#[serial]
fn unreachable_store_saves_locally_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[store]\nkind = \"remote\"\nendpoint = \"http://127.0.0.1:1\"\ntimeout_secs = 2\n",
    );
    let output = callboard(&["--config", &config, "edit", "--email", "a@b.co", "--value", "42.5"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Saved locally only"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("* 11:00\t42.5"));
}

#[test]
#[serial]
fn lookup_with_memory_store_finds_nothing() {
    let output = callboard(&["--memory", "lookup", "--email", "a@b.co"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "none");
}

#[test]
#[serial]
fn config_write_round_trips_through_show() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("written.toml");
    let target_str = target.to_string_lossy().to_string();
    let output = callboard(&["--memory", "config", "--write", &target_str]);
    assert!(output.status.success());
    let text = std::fs::read_to_string(&target).unwrap();
    assert!(text.contains("[store]"));
    assert!(text.contains("slot_index = 2"));
    assert!(text.contains("kind = \"memory\""));

    let output = callboard(&["--config", &target_str, "show"]);
    assert!(output.status.success());
}

/// Minimal preference store endpoint: one connection per canned reply,
/// returning each request's first line and body.
fn fake_store(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<(String, String)>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake store");
    let endpoint = format!("http://{}", listener.local_addr().expect("local addr"));
    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in replies {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut raw = vec![0u8; length];
            reader.read_exact(&mut raw).expect("request body");
            let reply = format!(
                "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).expect("write reply");
            seen.push((
                request_line.trim_end().to_string(),
                String::from_utf8_lossy(&raw).to_string(),
            ));
        }
        seen
    });
    (endpoint, handle)
}

fn remote_config(dir: &Path, endpoint: &str) -> String {
    write_config(
        dir,
        &format!(
            "[store]\nkind = \"remote\"\nendpoint = \"{endpoint}\"\n\
             access_key = \"test-key\"\ntimeout_secs = 5\n"
        ),
    )
}

#[test]
#[serial]
fn edit_without_overwrite_keeps_stored_value() {
    let (endpoint, server) = fake_store(vec![(200, r#"[{"custom_value":410}]"#)]);
    let dir = tempfile::tempdir().unwrap();
    let config = remote_config(dir.path(), &endpoint);

    let output = callboard(&["--config", &config, "edit", "--email", "a@b.co", "--value", "520"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A value is already stored (410); pass --overwrite to replace it"));
    assert!(!stdout.contains("Saved"));
    assert!(!stdout.contains("* 11:00"));

    let seen = server.join().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.starts_with("GET /rest/v1/user_settings?"));
}

#[test]
#[serial]
fn edit_with_overwrite_replaces_stored_value() {
    let (endpoint, server) = fake_store(vec![(200, r#"[{"custom_value":410}]"#), (201, "")]);
    let dir = tempfile::tempdir().unwrap();
    let config = remote_config(dir.path(), &endpoint);

    let output = callboard(&[
        "--config",
        &config,
        "edit",
        "--email",
        "a@b.co",
        "--value",
        "520",
        "--overwrite",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved Calls at 11:00 = 520"));
    assert!(stdout.contains("* 11:00\t520"));

    let seen = server.join().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].0.starts_with("GET /rest/v1/user_settings?"));
    assert_eq!(
        seen[1].0,
        "POST /rest/v1/user_settings?on_conflict=email%2Csetting_key HTTP/1.1"
    );
    let body: serde_json::Value = serde_json::from_str(&seen[1].1).unwrap();
    assert_eq!(body["email"], "a@b.co");
    assert_eq!(body["setting_key"], "Calls at 11:00");
    assert_eq!(body["custom_value"], 520.0);
}
