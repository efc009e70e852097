//! Integration tests for layered configuration

use super::test_utils::{with_empty_config_home, with_env_vars};
use std::fs;
use tempfile::TempDir;
use verse::config::{global_config_path, ConfigLoader};
use verse::Repository;

#[test]
fn test_defaults_without_sources() {
    let workspace = TempDir::new().unwrap();
    let config = with_empty_config_home(|| ConfigLoader::load(workspace.path()).unwrap());

    assert!(config.walk.follow_symlinks);
    assert_eq!(config.walk.max_depth, 64);
    assert!(config.status.show_content);
    assert_eq!(config.status.hash_width, 8);
}

#[test]
fn test_repo_file_overrides_global() {
    let workspace = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let home = config_home.path().to_string_lossy().to_string();

    let config = with_env_vars(&[("XDG_CONFIG_HOME", home.as_str())], || {
        let global = global_config_path().unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "[status]\nhash_width = 12\nshow_content = false\n").unwrap();

        Repository::open(workspace.path()).init().unwrap();
        fs::write(
            workspace.path().join(".verse").join("config"),
            "[status]\nhash_width = 16\n",
        )
        .unwrap();

        ConfigLoader::load(workspace.path()).unwrap()
    });

    assert_eq!(config.status.hash_width, 16);
    assert!(!config.status.show_content);
}

#[test]
fn test_environment_overrides_files() {
    let workspace = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let home = config_home.path().to_string_lossy().to_string();

    let config = with_env_vars(
        &[
            ("XDG_CONFIG_HOME", home.as_str()),
            ("VERSE_WALK__MAX_DEPTH", "7"),
            ("VERSE_WALK__FOLLOW_SYMLINKS", "false"),
        ],
        || {
            Repository::open(workspace.path()).init().unwrap();
            fs::write(
                workspace.path().join(".verse").join("config"),
                "[walk]\nmax_depth = 20\n",
            )
            .unwrap();
            ConfigLoader::load(workspace.path()).unwrap()
        },
    );

    assert_eq!(config.walk.max_depth, 7);
    assert!(!config.walk.follow_symlinks);
}

#[test]
fn test_invalid_repo_file_is_error() {
    let workspace = TempDir::new().unwrap();
    Repository::open(workspace.path()).init().unwrap();
    fs::write(workspace.path().join(".verse").join("config"), "[walk\n").unwrap();

    let result = with_empty_config_home(|| ConfigLoader::load(workspace.path()));
    assert!(result.is_err());
}

#[test]
fn test_global_path_under_xdg_config_home() {
    let config_home = TempDir::new().unwrap();
    let home = config_home.path().to_string_lossy().to_string();
    let path = with_env_vars(&[("XDG_CONFIG_HOME", home.as_str())], || {
        global_config_path().unwrap()
    });
    assert_eq!(path, config_home.path().join("verse").join("config.toml"));
}
