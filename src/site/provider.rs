//! Site document providers.
//!
//! # Graceful Degradation
//!
//! - Missing site directory: Yields no documents (the scan reports it)
//! - Unreadable directory entry or file: Logged and skipped
//! - Symlinked pages and directories: Followed; link cycles are logged and skipped
//! - Non-UTF8 content: Decoded lossily; marker substrings are ASCII
//!
//! Documents are always returned in path order so that reports are
//! reproducible.

use crate::data::policy::SITE_DOCUMENT_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One page of a built site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDocument {
    pub path: PathBuf,
    pub text: String,
}

impl SiteDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SiteDocument {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Source of site documents for the tag scan.
pub trait DocumentProvider {
    /// Location the documents come from, used in findings
    fn root(&self) -> &Path;

    /// All documents, sorted by path
    fn documents(&self) -> Vec<SiteDocument>;
}

/// Reads `*.html` files recursively from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsDocumentProvider {
    root: PathBuf,
}

impl FsDocumentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsDocumentProvider { root: root.into() }
    }

    fn is_site_document(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == SITE_DOCUMENT_EXTENSION)
            .unwrap_or(false)
    }
}

impl DocumentProvider for FsDocumentProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn documents(&self) -> Vec<SiteDocument> {
        if !self.root.is_dir() {
            debug!(root = %self.root.display(), "site directory does not exist");
            return Vec::new();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable site entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && Self::is_site_document(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();

        paths
            .into_iter()
            .filter_map(|path| match fs::read(&path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    Some(SiteDocument { path, text })
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable site document");
                    None
                }
            })
            .collect()
    }
}

/// Fixed, in-memory documents. Useful when pages come from somewhere other
/// than the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentProvider {
    root: PathBuf,
    documents: Vec<SiteDocument>,
}

impl StaticDocumentProvider {
    pub fn new(root: impl Into<PathBuf>, mut documents: Vec<SiteDocument>) -> Self {
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        StaticDocumentProvider {
            root: root.into(),
            documents,
        }
    }
}

impl DocumentProvider for StaticDocumentProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn documents(&self) -> Vec<SiteDocument> {
        self.documents.clone()
    }
}
