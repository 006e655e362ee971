// tests/config_test.rs
use release_tag::config::{load_config, Config, CONFIG_FILE_NAME};
use release_tag::ReleaseError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.version_file.path, PathBuf::from("roc/version.go"));
    assert_eq!(config.version_file.constant, "bindingsVersion");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[version_file]
path = "src/version.go"
constant = "Version"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), Path::new(".")).unwrap();
    assert_eq!(config.version_file.path, PathBuf::from("src/version.go"));
    assert_eq!(config.version_file.constant, "Version");
}

#[test]
fn test_load_from_repository_root() {
    let repo_root = TempDir::new().unwrap();
    std::fs::write(
        repo_root.path().join(CONFIG_FILE_NAME),
        "[version_file]\npath = \"go/version.go\"\n",
    )
    .unwrap();

    let config = load_config(None, repo_root.path()).unwrap();
    assert_eq!(config.version_file.path, PathBuf::from("go/version.go"));
    assert_eq!(config.version_file.constant, "bindingsVersion");
}

#[test]
fn test_push_target_cannot_come_from_config() {
    let repo_root = TempDir::new().unwrap();
    std::fs::write(
        repo_root.path().join(CONFIG_FILE_NAME),
        "[behavior]\ndefault_remote = \"origin\"\n",
    )
    .unwrap();

    let err = load_config(None, repo_root.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
    assert!(err.to_string().contains("behavior"));
}

#[test]
fn test_explicit_path_wins_over_repository_root() {
    let repo_root = TempDir::new().unwrap();
    std::fs::write(
        repo_root.path().join(CONFIG_FILE_NAME),
        "[version_file]\nconstant = \"fromRoot\"\n",
    )
    .unwrap();

    let mut explicit = NamedTempFile::new().unwrap();
    explicit
        .write_all(b"[version_file]\nconstant = \"fromFlag\"\n")
        .unwrap();

    let config = load_config(Some(explicit.path()), repo_root.path()).unwrap();
    assert_eq!(config.version_file.constant, "fromFlag");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let repo_root = TempDir::new().unwrap();
    let missing = repo_root.path().join("nope.toml");

    let err = load_config(Some(&missing), repo_root.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[version_file\npath = ").unwrap();

    let err = load_config(Some(temp_file.path()), Path::new(".")).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_absolute_version_file_path_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[version_file]\npath = \"/etc/version.go\"\n")
        .unwrap();

    assert!(load_config(Some(temp_file.path()), Path::new(".")).is_err());
}
