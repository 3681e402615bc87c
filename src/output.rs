//! CLI output formatting.
//!
//! Each report has a `format_*` function returning lines, for testability,
//! and a `print_*` wrapper that writes them to stdout. Logging goes through
//! `tracing` on stderr and is separate from this.
//!
//! ## Generate
//!
//! ```text
//! Sitemap written: site/sitemap.xml
//!     Total URLs: 8
//!     Base URL: https://scoopster.ca
//!
//! Sample URLs
//!     https://scoopster.ca/about/
//!     https://scoopster.ca/blog/post-1.html
//!     ...
//!     ... and 3 more
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 https://scoopster.ca/about/
//!     Priority: 0.7  Changefreq: monthly  Lastmod: 2024-05-17
//! ```

use crate::generate::GenerateReport;
use crate::sitemap::SitemapDocument;

/// How many URLs the generate summary lists.
pub const SAMPLE_SIZE: usize = 5;

fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format the summary shown after a successful run.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![
        format!("Sitemap written: {}", report.output_path.display()),
        format!("    Total URLs: {}", report.document.len()),
        format!("    Base URL: {}", report.base_url),
    ];

    if report.document.is_empty() {
        return lines;
    }

    lines.push(String::new());
    lines.push("Sample URLs".to_string());
    let entries = report.document.entries();
    for entry in entries.iter().take(SAMPLE_SIZE) {
        lines.push(format!("    {}", entry.location));
    }
    if entries.len() > SAMPLE_SIZE {
        lines.push(format!("    ... and {} more", entries.len() - SAMPLE_SIZE));
    }
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Format every entry of a document that was built but not written.
pub fn format_check_output(document: &SitemapDocument) -> Vec<String> {
    let mut lines = Vec::with_capacity(document.len() * 2 + 1);
    for (i, entry) in document.entries().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.location));
        lines.push(format!(
            "    Priority: {}  Changefreq: {}  Lastmod: {}",
            entry.priority,
            entry.changefreq,
            entry.last_modified.format("%Y-%m-%d")
        ));
    }
    lines.push(format!("{} URLs", document.len()));
    lines
}

pub fn print_check_output(document: &SitemapDocument) {
    for line in format_check_output(document) {
        println!("{}", line);
    }
}
