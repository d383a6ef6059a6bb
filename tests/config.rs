//! Configuration system tests
//!
//! Tests for config paths and colorizer config loading.

use blockbands::config_paths;
use blockbands::palette::{Color, REGION_BORDER};
use blockbands::{ColorPolicy, ColorizerConfig};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("blockbands"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_under_config_dir() {
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(config_paths::config_dir().unwrap()));
}

// ========================================================================
// ColorizerConfig Tests
// ========================================================================

#[test]
fn test_load_from_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ColorizerConfig::load_from(&dir.path().join("missing.yaml"));
    assert_eq!(config, ColorizerConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "regionColor: \"#10203040\"\ncolorPolicy: depth\n",
    )
    .unwrap();

    let config = ColorizerConfig::load_from(&path);
    assert_eq!(config.color_policy, ColorPolicy::Depth);
    assert_eq!(config.region_color(), Color::rgba(0x10, 0x20, 0x30, 0x40));
    assert_eq!(config.region_border(), REGION_BORDER);
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "colorPolicy: [unclosed\n").unwrap();

    assert_eq!(ColorizerConfig::load_from(&path), ColorizerConfig::default());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = ColorizerConfig::parse("theme: dark\ncolorPolicy: hash\n").unwrap();
    assert_eq!(config.color_policy, ColorPolicy::Hash);
}

#[test]
fn test_directory_path_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        ColorizerConfig::load_from(dir.path()),
        ColorizerConfig::default()
    );
}
