//! Path canonicalization and workspace-relative resolution

use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized (symlinks, `..`, `.`) and the
/// missing remainder is appended lexically.
pub fn canonicalize_lenient(path: &Path) -> Result<PathBuf, StorageError> {
    let lexical = normalize_lexically(path);

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        match dunce::canonicalize(existing) {
            Ok(canonical) => {
                let mut result = canonical;
                for part in missing.iter().rev() {
                    result.push(part);
                }
                return Ok(result);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(StorageError::io(path, e));
                };
                missing.push(name.to_os_string());
                existing = parent;
            }
            Err(e) => return Err(StorageError::io(path, e)),
        }
    }
}

/// Drop `.` components and fold `..` without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// A path inside the workspace, as found on disk and as named in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePath {
    /// Canonical root joined with the relative path, names untouched
    pub disk: PathBuf,
    /// NFC-normalized names for snapshot lookup; empty for the root
    pub components: Vec<String>,
}

/// Resolve `path` against the workspace `root`.
///
/// Relative paths are taken relative to `root`. Paths that lie lexically
/// under the root keep their own final name, so a symlink inside the
/// workspace is resolved as the link rather than its target. Otherwise only
/// the parent is canonicalized before the prefix check. Paths outside the
/// root are rejected.
pub fn resolve_workspace_path(root: &Path, path: &Path) -> Result<WorkspacePath, StorageError> {
    let canonical_root = dunce::canonicalize(root).map_err(|e| StorageError::io(root, e))?;
    let relative = workspace_relative(root, &canonical_root, path)?;

    let components = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(normalize_name(&name.to_string_lossy())),
            _ => None,
        })
        .collect();

    Ok(WorkspacePath {
        disk: canonical_root.join(&relative),
        components,
    })
}

/// NFC-normalized component names of `path` relative to `root`
pub fn relative_components(root: &Path, path: &Path) -> Result<Vec<String>, StorageError> {
    Ok(resolve_workspace_path(root, path)?.components)
}

fn workspace_relative(
    root: &Path,
    canonical_root: &Path,
    path: &Path,
) -> Result<PathBuf, StorageError> {
    if path.is_relative() {
        let lexical = normalize_lexically(path);
        if !matches!(lexical.components().next(), Some(Component::ParentDir)) {
            return Ok(lexical);
        }
    }

    let target = normalize_lexically(&canonical_root.join(path));
    let absolute_root = if root.is_absolute() {
        normalize_lexically(root)
    } else {
        let cwd = std::env::current_dir().map_err(|e| StorageError::io(root, e))?;
        normalize_lexically(&cwd.join(root))
    };
    for base in [canonical_root, absolute_root.as_path()] {
        if let Ok(relative) = target.strip_prefix(base) {
            return Ok(relative.to_path_buf());
        }
    }

    // Resolve symlinked ancestors, keep the final name as given
    let resolved = match (target.parent(), target.file_name()) {
        (Some(parent), Some(name)) => canonicalize_lenient(parent)?.join(name),
        _ => canonicalize_lenient(&target)?,
    };
    resolved
        .strip_prefix(canonical_root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            StorageError::InvalidPath(format!(
                "{} is outside the workspace {}",
                path.display(),
                canonical_root.display()
            ))
        })
}

/// Normalize Unicode to NFC for name comparison
pub fn normalize_name(name: &str) -> String {
    name.nfc().collect()
}
