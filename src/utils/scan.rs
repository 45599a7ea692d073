//! Directory scanning with exclude patterns.
//!
//! Patterns are glob expressions matched against paths relative to the scan
//! root, using `/` separators (e.g. `**/test/**`, `src/Legacy*`). A scan
//! narrowed to a subdirectory still matches relative to the root.

use std::path::{Component, Path, PathBuf};

use glob_match::glob_match;
use walkdir::{DirEntry, WalkDir};

use crate::config::IGNORED_DIRECTORY_NAMES;
use crate::errors::AppResult;

/// Walks a directory tree, skipping excluded and build-output directories
#[derive(Debug, Clone)]
pub struct SourceScanner {
    /// Directory exclude patterns are relative to
    root: PathBuf,
    /// Directory the walk starts from, `root` or below it
    start: PathBuf,
    excludes: Vec<String>,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>, excludes: Vec<String>) -> Self {
        let root = root.into();
        Self {
            start: root.clone(),
            root,
            excludes,
        }
    }

    /// Walk only `dir`, still matching excludes against paths relative to
    /// the scanner root
    pub fn within(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start = dir.into();
        self
    }

    /// Files whose extension is `extension`, in sorted walk order
    pub fn files_with_extension(&self, extension: &str) -> AppResult<Vec<PathBuf>> {
        self.files(|path| path.extension().is_some_and(|e| e == extension))
    }

    /// Files whose file name is exactly `file_name`
    pub fn files_named(&self, file_name: &str) -> AppResult<Vec<PathBuf>> {
        self.files(|path| path.file_name().is_some_and(|n| n == file_name))
    }

    fn files(&self, mut keep: impl FnMut(&Path) -> bool) -> AppResult<Vec<PathBuf>> {
        let mut found = Vec::new();

        let walker = WalkDir::new(&self.start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && keep(entry.path()) {
                found.push(entry.into_path());
            }
        }

        Ok(found)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if IGNORED_DIRECTORY_NAMES.contains(&name.as_ref()) {
                return true;
            }
        }

        let relative = relative_path(&self.root, entry.path());
        let excluded = self
            .excludes
            .iter()
            .any(|pattern| glob_match(pattern, &relative));
        if excluded {
            tracing::debug!("Excluded: {}", relative);
        }
        excluded
    }
}

/// `path` relative to `base` with `/` separators; `path` itself when it is
/// not under `base`.
pub fn relative_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
