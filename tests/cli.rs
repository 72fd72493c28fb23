//! End-to-end tests for the eventgen binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const TOKEN_ABI: &str = r#"[
  {"type": "function", "name": "mint", "inputs": [{"name": "to", "type": "address"}], "outputs": [], "stateMutability": "nonpayable"},
  {"type": "event", "name": "Transfer", "anonymous": false, "inputs": [
    {"name": "from", "type": "address", "indexed": true},
    {"name": "to", "type": "address", "indexed": true},
    {"name": "value", "type": "uint256", "indexed": false}
  ]},
  {"type": "event", "name": "Memo", "anonymous": false, "inputs": [
    {"name": "sender", "type": "address", "indexed": true},
    {"name": "note", "type": "string", "indexed": false}
  ]},
  {"type": "event", "name": "Paused", "anonymous": false, "inputs": [
    {"name": "epoch", "type": "uint64", "indexed": false}
  ]}
]"#;

fn eventgen(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eventgen"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run eventgen")
}

fn workspace(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("abi")).unwrap();
    fs::write(dir.path().join("abi/token.json"), TOKEN_ABI).unwrap();
    fs::write(dir.path().join("eventgen.yaml"), config).unwrap();
    dir
}

#[test]
fn test_generates_bindings_to_stdout() {
    let dir = workspace(
        "abi: abi/token.json\npackage: token\nevents:\n  - Transfer\n  - Memo(address,string)\n",
    );

    let output = eventgen(&["eventgen.yaml"], dir.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("pub mod token {"));
    assert!(stdout.contains("pub struct Transfer {"));
    assert!(stdout.contains("pub struct Memo {"));
    assert!(stdout.contains("pub note: String,"));
}

#[test]
fn test_writes_output_file_with_overrides() {
    let dir = workspace("abi: abi/token.json\nevents:\n  - Transfer\n");
    fs::write(
        dir.path().join("names.hbs"),
        "{{package_name}}:{{#each events}}{{name}}({{#each arguments}}{{target_name}},{{/each}}){{/each}}",
    )
    .unwrap();

    let output = eventgen(
        &[
            "eventgen.yaml",
            "--template",
            "names.hbs",
            "--package",
            "custom",
            "--output",
            "gen/out.txt",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(dir.path().join("gen/out.txt")).unwrap();
    assert_eq!(written, "custom:Transfer(From,To,Value,)\n");
}

#[test]
fn test_unknown_event_fails_without_output() {
    let dir = workspace("abi: abi/token.json\nevents:\n  - Transfer\n  - Mint\n");

    let output = eventgen(&["eventgen.yaml", "--output", "out.rs"], dir.path());
    assert!(!output.status.success());
    assert!(!dir.path().join("out.rs").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Couldn't find event \"Mint\" in ABI \"token.json\""),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_report_all_lists_every_problem() {
    let dir = workspace("abi: abi/token.json\nevents:\n  - Mint\n  - Paused\n");

    let output = eventgen(&["eventgen.yaml", "--report-all"], dir.path());
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 errors:"), "stderr: {}", stderr);
    assert!(stderr.contains("Mint"));
    assert!(stderr.contains("uint64"));
}

#[test]
fn test_list_events_prints_signatures() {
    let dir = workspace("abi: abi/token.json\nevents: []\n");

    let output = eventgen(&["eventgen.yaml", "--list-events"], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef Transfer(address,address,uint256)"
    );
    assert!(lines[1].ends_with(" Memo(address,string)"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = workspace("abi: abi/token.json\nevents: []\n");

    let output = eventgen(&["eventgen.yaml"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one event is required"));
}

#[test]
fn test_invalid_package_override_is_rejected() {
    let dir = workspace("abi: abi/token.json\nevents:\n  - Transfer\n");

    let output = eventgen(
        &["eventgen.yaml", "--package", "my-mod", "--output", "out.rs"],
        dir.path(),
    );
    assert!(!output.status.success());
    assert!(!dir.path().join("out.rs").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"my-mod\" is not a valid module name"), "stderr: {}", stderr);
}

#[test]
fn test_keyword_package_is_rejected() {
    let dir = workspace("abi: abi/token.json\npackage: type\nevents:\n  - Transfer\n");

    let output = eventgen(&["eventgen.yaml"], dir.path());
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("pub mod type"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"type\" is not a valid module name"), "stderr: {}", stderr);
}

#[test]
fn test_event_named_like_generated_enum_is_renamed() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("abi.json"),
        r#"[{"type": "event", "name": "Event", "inputs": [{"name": "who", "type": "address"}]}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("eventgen.yaml"), "abi: abi.json\nevents:\n  - Event\n").unwrap();

    let output = eventgen(&["eventgen.yaml"], dir.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("pub struct Event1 {"));
    assert!(stdout.contains("pub enum Event {"));
    assert!(!stdout.contains("pub struct Event {"));
}
