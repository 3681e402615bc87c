//! Shared types used across all pipeline stages.
//!
//! The scanner produces pages, the mapper produces classifications, and the
//! serializer consumes entries. These are the values that flow between them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a page is expected to change.
///
/// Search engines treat this as a hint only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The lowercase token used in `<changefreq>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority and change frequency assigned to one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Numeric string in `0.0..=1.0`, emitted verbatim.
    pub priority: String,
    pub changefreq: ChangeFrequency,
}

/// One `<url>` element of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    /// Fully-qualified URL.
    pub location: String,
    /// UTC calendar date of the file's modification time.
    #[serde(serialize_with = "serialize_date")]
    pub last_modified: NaiveDate,
    pub changefreq: ChangeFrequency,
    pub priority: String,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
}
