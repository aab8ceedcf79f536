//! Usage scan: is each declared asset referenced by some source file?
//!
//! Matching is a raw substring test of the asset string against file text.
//! Candidate files are discovered once per run in a stable order and each
//! file's text is loaded lazily, at most once.
use crate::sink::ProgressSink;
use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One candidate source file and its lazily loaded text.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    text: OnceCell<Option<String>>,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            text: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File text, or `None` when it cannot be read.
    fn text(&self) -> Option<&str> {
        self.text
            .get_or_init(|| match fs::read(&self.path) {
                Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                Err(err) => {
                    tracing::debug!(path = %self.path.display(), %err, "unreadable source file");
                    None
                }
            })
            .as_deref()
    }

    /// Whether the file text contains `needle`; unreadable files never match.
    pub fn contains(&self, needle: &str) -> bool {
        self.text().is_some_and(|text| text.contains(needle))
    }
}

/// Candidate source files under a project root.
#[derive(Debug, Default)]
pub struct SourceCorpus {
    files: Vec<SourceFile>,
}

impl SourceCorpus {
    /// Walk `root` for files whose extension is in `extensions`, never
    /// descending into directories named in `exclude_dirs`.
    pub fn discover(root: &Path, extensions: &[String], exclude_dirs: &[String]) -> Self {
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry, exclude_dirs));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(%err, "skipping unwalkable path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if has_extension(entry.path(), extensions) {
                files.push(SourceFile::new(entry.into_path()));
            }
        }
        tracing::debug!(root = %root.display(), count = files.len(), "discovered source files");
        Self { files }
    }

    #[cfg(test)]
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: paths.into_iter().map(SourceFile::new).collect(),
        }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// First file whose text contains `asset`, in enumeration order.
    pub fn first_reference(&self, asset: &str) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.contains(asset))
    }
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    exclude_dirs.iter().any(|dir| dir.as_str() == name)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.as_str() == ext))
}

/// Label emitted after each asset is scanned.
pub fn usage_label(asset: &str) -> String {
    format!("Checking asset usage: {asset}")
}

/// Return the declared assets that no candidate file references, in declared
/// order, reporting one progress increment of `100 / N` per asset.
pub fn scan_usage(
    assets: &[String],
    corpus: &SourceCorpus,
    progress: &mut dyn ProgressSink,
) -> Vec<String> {
    let mut unused = Vec::new();
    if assets.is_empty() {
        return unused;
    }
    let increment = 100.0 / assets.len() as f64;

    for asset in assets {
        match corpus.first_reference(asset) {
            Some(file) => {
                tracing::debug!(asset = asset.as_str(), file = %file.path().display(), "asset referenced");
            }
            None => {
                tracing::debug!(asset = asset.as_str(), "asset unreferenced");
                unused.push(asset.clone());
            }
        }
        progress.report(&usage_label(asset), Some(increment));
    }

    unused
}

#[cfg(test)]
#[path = "usage_tests.rs"]
mod tests;
