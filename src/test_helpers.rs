//! Shared test utilities for the sitemap test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let document = build_document(tmp.path(), &config).unwrap();
//! let home = find_entry(&document, "https://example.com/");
//! ```

use chrono::DateTime;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

use crate::sitemap::SitemapDocument;
use crate::types::SitemapEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Every page gets the same pinned modification time so `lastmod` values are
/// deterministic.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            set_mtime(&dst_path, FIXTURE_MTIME);
        }
    }
    Ok(())
}

/// Modification time given to every fixture file.
pub const FIXTURE_MTIME: &str = "2024-05-17T12:00:00Z";

/// Write a small HTML page at `relative` under `root`, creating parents.
pub fn write_page(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "<!doctype html><title>test</title>").unwrap();
    path
}

/// Pin a file's modification time to an RFC 3339 timestamp.
pub fn set_mtime(path: &Path, rfc3339: &str) {
    let time: SystemTime = DateTime::parse_from_rfc3339(rfc3339).unwrap().into();
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

// =========================================================================
// Document lookups: panics with a clear message on miss
// =========================================================================

/// All locations in document order.
pub fn locations(document: &SitemapDocument) -> Vec<String> {
    document
        .entries()
        .iter()
        .map(|e| e.location.clone())
        .collect()
}

/// Find an entry by location. Panics if not found.
pub fn find_entry<'a>(document: &'a SitemapDocument, location: &str) -> &'a SitemapEntry {
    document
        .entries()
        .iter()
        .find(|e| e.location == location)
        .unwrap_or_else(|| {
            let available = locations(document);
            panic!("entry '{location}' not found. Available: {available:?}")
        })
}
