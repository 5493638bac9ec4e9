use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const DECK_JSON: &str = r#"{
    "global": { "footer_text": "{{global.name}}", "name": "Test Workshop" },
    "slides": [
        { "id": "intro", "title": "Hello" },
        { "id": "middle", "title": "Middle" },
        { "id": "outro", "title": "Bye" }
    ]
}"#;

fn deck_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_workshop-deck"));
    command.env("RUST_LOG", "error");
    command
}

fn run_command(args: &[&str]) -> Output {
    deck_command()
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = deck_command()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .expect("Missing stdin")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for command")
}

#[test]
fn test_render_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, DECK_JSON).expect("Failed to write config");

    let css_path = temp_dir.path().join("deck.css");
    fs::write(&css_path, "body { margin: 0; }").expect("Failed to write CSS file");

    let output_path = temp_dir.path().join("out").join("deck.html");

    let output = run_command(&[
        "render",
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--css",
        css_path.to_str().unwrap(),
        "--theme",
        "dark",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let html = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("<style>body { margin: 0; }</style>"));
    assert!(html.contains("data-color-scheme=\"dark\""));
    assert_eq!(html.matches("Test Workshop</footer>").count(), 3);
}

#[test]
fn test_render_missing_config_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.html");

    let output = run_command(&[
        "render",
        "-c",
        "/nonexistent/config.json",
        "-o",
        output_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Path not found"));
    assert!(!output_path.exists());
}

#[test]
fn test_render_rejects_unknown_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, DECK_JSON).expect("Failed to write config");

    let output = run_command(&[
        "render",
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        temp_dir.path().join("deck.html").to_str().unwrap(),
        "--mode",
        "inline",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_present_remembers_last_slide() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, DECK_JSON).expect("Failed to write config");
    let state_path = temp_dir.path().join("state.json");

    let args = [
        "present",
        "-c",
        config_path.to_str().unwrap(),
        "--state",
        state_path.to_str().unwrap(),
    ];

    let output = run_with_stdin(&args, "next\nnext\nnext\n");
    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[3/3] Bye"));

    let state = fs::read_to_string(&state_path).expect("State file missing");
    assert!(state.contains("\"currentSlide\": \"2\""));

    let output = run_with_stdin(&args, "quit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("[3/3] Bye"));
}
