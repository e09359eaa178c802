//! Tests for configuration handling.

use basalt_utils::{CONFIG_FILE_NAME, Config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_new() {
    let config = Config::new("test-project");
    assert_eq!(config.package.name, "test-project");
    assert_eq!(config.package.version, "0.1.0");
    assert_eq!(config.resolver.max_include_depth, 32);
    assert!(config.resolver.normalize);
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

    let mut config = Config::new("test-project");
    config.resolver.max_include_depth = 4;
    config.save(&config_path).unwrap();

    let loaded = Config::load(&config_path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_saved_layout() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    Config::new("files").save(&config_path).unwrap();

    insta::assert_snapshot!(fs::read_to_string(&config_path).unwrap(), @r#"
    [package]
    name = "files"
    version = "0.1.0"

    [resolver]
    max_include_depth = 32
    normalize = true
    "#);
}

#[test]
fn test_config_load_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "[package]\nname = 3\n").unwrap();

    let err = Config::load(&config_path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
}

#[test]
fn test_config_find_from_subdirectory() {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path();

    let config = Config::new("find-test");
    config.save(project_dir.join(CONFIG_FILE_NAME)).unwrap();

    let sub_dir = project_dir.join("specs").join("v2");
    fs::create_dir_all(&sub_dir).unwrap();

    let (found_config, found_dir) = Config::find_from(&sub_dir).unwrap();
    assert_eq!(found_config.package.name, "find-test");
    assert_eq!(found_dir, project_dir);
}

#[test]
fn test_config_find_missing() {
    let temp_dir = TempDir::new().unwrap();
    // The temp dir lives under the system temp root, which has no basalt.toml.
    let result = Config::find_from(temp_dir.path());
    assert!(result.is_err());
}
