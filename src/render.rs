//! Text rendering for `status` and `check`

use crate::changes::{ChangeDetector, ChangeKind};
use crate::error::StorageError;
use crate::repository::{Repository, StatusReport};
use crate::store::{FsObjectStore, ObjectStore};
use crate::tree::node::Tree;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;
use std::path::Path;

const RULE: &str = "──────────────────────────────────────────";

/// Rendering switches, usually taken from `StatusConfig`
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Print blob contents under each file in `status`
    pub show_content: bool,
    /// Hex digits shown for truncated hashes
    pub hash_width: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_content: true,
            hash_width: 8,
            color: true,
        }
    }
}

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Render the head hash followed by the head tree.
///
/// Directories open a framed section; files list their truncated hash and,
/// when enabled, their content.
pub fn format_status<S: ObjectStore + ?Sized>(
    report: &StatusReport,
    store: &S,
    opts: &RenderOptions,
) -> Result<String, StorageError> {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        paint("Head:", Style::new().bold(), opts.color),
        report.head
    );
    render_stored_tree(&mut out, store, &report.tree, 0, opts)?;
    Ok(out)
}

fn render_stored_tree<S: ObjectStore + ?Sized>(
    out: &mut String,
    store: &S,
    tree: &Tree,
    depth: usize,
    opts: &RenderOptions,
) -> Result<(), StorageError> {
    let indent = "  ".repeat(depth);
    for entry in tree {
        if entry.is_blob {
            let name = paint(&entry.name, Style::new().green(), opts.color);
            let hash = paint(&entry.hash.short(opts.hash_width), Style::new().dimmed(), opts.color);
            let _ = writeln!(out, "│{}  file: {}  {}", indent, name, hash);
            if opts.show_content {
                let blob = store.get_blob(&entry.hash)?;
                render_content(out, &blob.content, &indent);
            }
        } else {
            let name = paint(&format!("{}/", entry.name), Style::new().blue().bold(), opts.color);
            let _ = writeln!(out, "┌{}", RULE);
            let _ = writeln!(out, "│{}{}", indent, name);
            let child = store.get_tree(&entry.hash)?;
            render_stored_tree(out, store, &child, depth + 1, opts)?;
            let _ = writeln!(out, "└{}", RULE);
        }
    }
    Ok(())
}

fn render_content(out: &mut String, content: &[u8], indent: &str) {
    let _ = writeln!(out, "│{}    ------------", indent);
    if content.contains(&0) {
        let _ = writeln!(out, "│{}    <binary, {} bytes>", indent, content.len());
        return;
    }
    for line in String::from_utf8_lossy(content).lines() {
        let _ = writeln!(out, "│{}    {}", indent, line);
    }
}

/// Render the live workspace as a tree, marking paths that differ from head.
///
/// The metadata directory is listed too; it is never reported changed. Before
/// the first snapshot nothing is marked.
pub fn format_workspace_tree(
    repo: &Repository,
    opts: &RenderOptions,
) -> Result<String, StorageError> {
    let head = match repo.head().get() {
        Ok(head) => Some(head),
        Err(StorageError::HeadNotFound(_)) => None,
        Err(e) => return Err(e),
    };
    let store = repo.store();
    let detector = head.map(|head| {
        ChangeDetector::new(repo.root(), &store, head)
            .with_walker(Walker::with_config(repo.walker_config().clone()))
    });
    let listing = Walker::with_config(WalkerConfig {
        ignore_names: Vec::new(),
        ..repo.walker_config().clone()
    });

    // Listed paths are absolute so they resolve the same way for any root spelling
    let root = dunce::canonicalize(repo.root()).map_err(|e| StorageError::io(repo.root(), e))?;
    let mut out = String::new();
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());
    let _ = writeln!(out, "{}", paint(&root_name, Style::new().blue().bold(), opts.color));

    let mut tree = WorkspaceTree {
        listing: &listing,
        detector: detector.as_ref(),
        opts,
        out: &mut out,
    };
    tree.render_dir(&root, "", 0)?;
    Ok(out)
}

struct WorkspaceTree<'a, 'd> {
    listing: &'a Walker,
    detector: Option<&'a ChangeDetector<'d, FsObjectStore>>,
    opts: &'a RenderOptions,
    out: &'a mut String,
}

impl WorkspaceTree<'_, '_> {
    fn render_dir(&mut self, dir: &Path, prefix: &str, depth: usize) -> Result<(), StorageError> {
        self.listing.check_depth(dir, depth)?;
        let entries = self.listing.list(dir)?;
        let count = entries.len();

        for (i, entry) in entries.iter().enumerate() {
            let last = i + 1 == count;
            let branch = if last { "└─ " } else { "├─ " };
            let kind = match self.detector {
                Some(detector) => detector.classify(entry.path())?,
                None => ChangeKind::Unchanged,
            };

            let line = self.entry_label(entry, kind);
            let _ = writeln!(
                self.out,
                "{}{}{}",
                paint(prefix, Style::new().dimmed(), self.opts.color),
                paint(branch, Style::new().dimmed(), self.opts.color),
                line
            );

            if let Entry::Directory { path, .. } = entry {
                let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
                self.render_dir(path, &child_prefix, depth + 1)?;
            }
        }
        Ok(())
    }

    fn entry_label(&self, entry: &Entry, kind: ChangeKind) -> String {
        let style = match (kind.is_changed(), entry.is_dir()) {
            (true, _) => Style::new().red().bold(),
            (false, true) => Style::new().blue().bold(),
            (false, false) => Style::new().green(),
        };
        let name = paint(entry.name(), style, self.opts.color);
        if kind.is_changed() {
            let marker = paint(&format!("[{}]", kind), Style::new().yellow(), self.opts.color);
            format!("{} {}", name, marker)
        } else {
            name
        }
    }
}
