//! Shared test utilities for integration tests
//!
//! Workspace fixtures and serialized access to process environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that touch `XDG_CONFIG_HOME` or `VERSE_*` variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set, restoring previous values afterwards
pub fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }
    result
}

/// Isolated global config home with no config file in it
pub fn with_empty_config_home<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let config_home = TempDir::new().unwrap();
    let path = config_home.path().to_string_lossy().to_string();
    with_env_vars(&[("XDG_CONFIG_HOME", path.as_str())], f)
}

/// `readme.txt` = "hello" and `src/main.txt` = "code"
pub fn sample_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "readme.txt", "hello");
    write_file(temp_dir.path(), "src/main.txt", "code");
    temp_dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Number of entries in `.verse/objects`
pub fn object_count(root: &Path) -> usize {
    fs::read_dir(root.join(".verse").join("objects"))
        .unwrap()
        .count()
}

/// `path` spelled relative to the current directory, without changing it
pub fn relative_from_cwd(path: &Path) -> PathBuf {
    let cwd = dunce::canonicalize(std::env::current_dir().unwrap()).unwrap();
    let target = dunce::canonicalize(path).unwrap();

    let common = cwd
        .components()
        .zip(target.components())
        .take_while(|(a, b)| a == b)
        .count();
    let mut relative = PathBuf::new();
    for _ in cwd.components().skip(common) {
        relative.push("..");
    }
    for component in target.components().skip(common) {
        relative.push(component);
    }
    relative
}
