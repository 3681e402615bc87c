//! Sitemap entries and XML serialization.
//!
//! Stage 3 of the sitemap pipeline. Turns classified pages into
//! [`SitemapEntry`] records and renders them in the
//! [sitemap protocol](https://www.sitemaps.org/protocol.html) format:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2024-05-17</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! ## Limitations
//!
//! - The output file is overwritten in place, not swapped in atomically. A
//!   crash mid-write leaves a truncated file; re-run to regenerate it.
//! - The protocol's limits (50,000 URLs, 50 MB per file) are not checked.

use crate::scan::PageFile;
use crate::types::{Classification, SitemapEntry};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("Failed to render sitemap XML: {0}")]
    Render(String),
    #[error("Failed to write sitemap to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SitemapEntry {
    /// Build the entry for one page.
    ///
    /// The modification time is truncated to its UTC calendar date.
    pub fn from_page(page: &PageFile, location: String, classification: Classification) -> Self {
        Self {
            location,
            last_modified: page.last_modified.date_naive(),
            changefreq: classification.changefreq,
            priority: classification.priority,
        }
    }
}

/// The complete, ordered list of entries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    entries: Vec<SitemapEntry>,
}

impl SitemapDocument {
    pub fn new(entries: Vec<SitemapEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the document as sitemap XML, two-space indented, with no
    /// trailing newline.
    pub fn render(&self) -> Result<String, SitemapError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
        write(&mut writer, Event::Start(urlset))?;

        for entry in &self.entries {
            write(&mut writer, Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.location)?;
            let lastmod = entry.last_modified.format("%Y-%m-%d").to_string();
            write_text_element(&mut writer, "lastmod", &lastmod)?;
            write_text_element(&mut writer, "changefreq", entry.changefreq.as_str())?;
            write_text_element(&mut writer, "priority", &entry.priority)?;
            write(&mut writer, Event::End(BytesEnd::new("url")))?;
        }

        write(&mut writer, Event::End(BytesEnd::new("urlset")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| SitemapError::Render(e.to_string()))
    }

    /// Render and write to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<(), SitemapError> {
        let xml = self.render()?;
        fs::write(path, xml).map_err(|source| SitemapError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SitemapError> {
    writer
        .write_event(event)
        .map_err(|e| SitemapError::Render(e.to_string()))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), SitemapError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}
