//! Filesystem scanning.
//!
//! Stage 1 of the sitemap pipeline. Walks the site root and returns every
//! `.html` page that is not excluded.
//!
//! ## Traversal
//!
//! ```text
//! site/
//! ├── index.html               → index.html
//! ├── 404.html                 ✗ excluded (404\.html)
//! ├── about/
//! │   └── index.html           → about/index.html
//! ├── node_modules/            ✗ excluded, never opened
//! │   └── pkg/readme.html
//! └── services/
//!     ├── index.html           → services/index.html
//!     └── lawn-care.html       → services/lawn-care.html
//! ```
//!
//! - Depth-first, pre-order. Each directory's entries are visited in file-name
//!   order, so the result does not depend on the platform's listing order.
//! - Exclusion is checked before a directory is descended into, so nothing
//!   inside an excluded subtree is examined. An unreadable `node_modules` is
//!   not an error.
//! - Only regular files ending in `.html` (case-sensitive) are pages.
//! - Symlinks are followed. A linked page or directory is reported under its
//!   link path. Broken links and link cycles fail the scan.

use crate::config::ExcludeSet;
use crate::mapping::relative_path;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Suffix that identifies a page.
pub const PAGE_SUFFIX: &str = ".html";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to read directory tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to read modification time of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An HTML page discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub absolute_path: PathBuf,
    /// Root-relative, `/`-separated, no leading slash.
    pub relative_path: String,
    pub last_modified: DateTime<Utc>,
}

/// Find every non-excluded page under `root`, in traversal order.
pub fn scan(root: &Path, excludes: &ExcludeSet) -> Result<Vec<PageFile>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, root, excludes));

    let mut pages = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !is_page(&entry) {
            continue;
        }
        let absolute_path = entry.path().to_path_buf();
        let relative_path = relative_path(root, &absolute_path);
        let modified = entry
            .metadata()?
            .modified()
            .map_err(|source| ScanError::Metadata {
                path: absolute_path.clone(),
                source,
            })?;

        debug!(page = %relative_path, "found page");
        pages.push(PageFile {
            absolute_path,
            relative_path,
            last_modified: DateTime::<Utc>::from(modified),
        });
    }

    Ok(pages)
}

fn is_excluded(entry: &DirEntry, root: &Path, excludes: &ExcludeSet) -> bool {
    // The root itself is never excluded.
    if entry.depth() == 0 {
        return false;
    }
    let relative = relative_path(root, entry.path());
    let excluded = excludes.is_excluded(&relative);
    if excluded {
        debug!(path = %relative, "excluded");
    }
    excluded
}

fn is_page(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(PAGE_SUFFIX)
}
