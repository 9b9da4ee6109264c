//! Source-tree scanning for the layering contract tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A matching source line, reported as `path:line: text`.
#[derive(Debug)]
pub struct Hit {
    pub location: String,
    pub text: String,
}

/// Every `.rs` file under one crate directory, loaded up front.
pub struct SourceTree {
    files: Vec<(String, String)>,
}

impl SourceTree {
    /// Load all Rust sources below `dir`, relative to the crate root.
    pub fn load(dir: &str) -> Self {
        let root = crate_root();
        let mut pending = vec![root.join(dir)];
        let mut files = Vec::new();

        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir)
                .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()));
            for path in entries.filter_map(|entry| entry.ok().map(|e| e.path())) {
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let source = fs::read_to_string(&path)
                        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
                    files.push((display_path(&root, &path), source));
                }
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Self { files }
    }

    /// Lines mentioning any of `needles`.
    pub fn mentions(&self, needles: &[&str]) -> Vec<Hit> {
        self.lines_where(|_, line| needles.iter().any(|n| line.contains(n)))
    }

    /// Lines in `mod.rs` files other than module declarations, cfg
    /// attributes and comments.
    pub fn mod_rs_bodies(&self) -> Vec<Hit> {
        self.lines_where(|path, line| {
            let line = line.trim();
            path.ends_with("/mod.rs")
                && !(line.is_empty()
                    || line.starts_with("//")
                    || line.starts_with("pub mod ")
                    || line.starts_with("mod ")
                    || line.starts_with("#[cfg"))
        })
    }

    fn lines_where(&self, keep: impl Fn(&str, &str) -> bool) -> Vec<Hit> {
        let keep = &keep;
        self.files
            .iter()
            .flat_map(|(path, source)| {
                source
                    .lines()
                    .enumerate()
                    .filter(move |(_, line)| keep(path, line))
                    .map(move |(idx, line)| Hit {
                        location: format!("{path}:{}", idx + 1),
                        text: line.to_string(),
                    })
            })
            .collect()
    }
}

/// Whether a path relative to the crate root exists.
pub fn exists(path: &str) -> bool {
    crate_root().join(path).exists()
}

/// Contents of a file relative to the crate root.
pub fn source_of(path: &str) -> String {
    fs::read_to_string(crate_root().join(path))
        .unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
