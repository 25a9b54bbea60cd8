// tests/config_test.rs
use cut_release::config::{load_config, Config};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.editor.command, "code --wait");
    assert_eq!(config.release.branch_name("2.150.0"), "releases/2.150.0");
    assert_eq!(
        config.git.user_email,
        "azure-pipelines-bot@microsoft.com".to_string()
    );
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[editor]
command = "nano"

[release]
notes_file = "docs/releaseNote.md"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.editor.command, "nano");
    assert_eq!(config.release.notes_file, "docs/releaseNote.md");
    assert_eq!(config.release.version_file, "src/agentversion");
    assert_eq!(config.github.repository, "microsoft/azure-pipelines-agent");
}

#[test]
#[serial]
fn test_load_full_fixture() {
    let config =
        load_config(Some("tests/fixtures/config_full.toml")).expect("Failed to load test config");
    assert_eq!(config.editor.command, "vim -n");
    assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(config.github.repository, "example/agent");
    assert_eq!(config.github.timeout_secs, 5);
    assert_eq!(config.release.branch_name("1.0.0"), "release/1.0.0");
    assert_eq!(config.release.remote, "upstream");
    assert_eq!(config.git.user_name, "release-bot");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    assert!(load_config(Some("tests/fixtures/does-not-exist.toml")).is_err());
}

#[test]
#[serial]
fn test_discovers_file_in_current_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("cut-release.toml"),
        "[release]\nremote = \"fork\"\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(original).unwrap();

    assert_eq!(result.unwrap().release.remote, "fork");
}
