//! Pipeline driver.
//!
//! Runs the stages once, in order: scan the root, map and classify each page,
//! build the document, write it. Nothing is retried and nothing is kept
//! between runs, so re-running on an unchanged tree reproduces the same file.

use crate::config::{ConfigError, SitemapConfig};
use crate::mapping::UrlMapper;
use crate::scan::{self, ScanError};
use crate::sitemap::{SitemapDocument, SitemapError};
use crate::types::SitemapEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Sitemap(#[from] SitemapError),
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct GenerateReport {
    pub document: SitemapDocument,
    pub output_path: PathBuf,
    pub base_url: String,
}

/// Where the sitemap for `root` is written.
///
/// Relative `output_file` values resolve against the root; absolute ones are
/// used as-is.
pub fn output_path(root: &Path, config: &SitemapConfig) -> PathBuf {
    root.join(&config.output_file)
}

/// Scan `root` and build the document without writing it.
pub fn build_document(
    root: &Path,
    config: &SitemapConfig,
) -> Result<SitemapDocument, GenerateError> {
    let excludes = config.exclude_set()?;

    info!(root = %root.display(), "scanning for pages");
    let pages = scan::scan(root, &excludes)?;
    info!(count = pages.len(), "scan complete");

    let mapper = UrlMapper::new(config);
    let entries = pages
        .iter()
        .map(|page| {
            let location = mapper.url(&page.relative_path);
            let classification = mapper.classify(&page.relative_path);
            SitemapEntry::from_page(page, location, classification)
        })
        .collect();

    Ok(SitemapDocument::new(entries))
}

/// Scan, build, and write the sitemap for `root`.
pub fn generate(root: &Path, config: &SitemapConfig) -> Result<GenerateReport, GenerateError> {
    let document = build_document(root, config)?;
    let output_path = output_path(root, config);

    info!(path = %output_path.display(), entries = document.len(), "writing sitemap");
    document.write_to(&output_path)?;

    Ok(GenerateReport {
        document,
        output_path,
        base_url: config.base_url.clone(),
    })
}
