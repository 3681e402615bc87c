//! # Sitegen Sitemap
//!
//! Generates a `sitemap.xml` for a static site. Every `.html` file under the
//! site root becomes one `<url>` entry; `index.html` files address their
//! directory.
//!
//! # Architecture: One-Pass Pipeline
//!
//! ```text
//! 1. Scan      site/       →  Vec<PageFile>      (filesystem → pages)
//! 2. Map       PageFile    →  URL + class        (pure, rule table)
//! 3. Format    page + class →  SitemapEntry       (mtime → calendar date)
//! 4. Write     entries     →  sitemap.xml        (quick-xml, full overwrite)
//! ```
//!
//! Each stage runs to completion before the next starts. There is no state
//! between runs; generating twice over an unchanged tree gives the same bytes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the site root, pruning excluded paths before descending |
//! | [`mapping`] | Stage 2: path → URL, path → priority/changefreq (first match wins) |
//! | [`sitemap`] | Stages 3–4: entry construction and XML serialization |
//! | [`generate`] | Runs the stages in order |
//! | [`config`] | Compiled-in defaults, optional `sitemap.toml` overrides, validation |
//! | [`types`] | Values shared between stages (`ChangeFrequency`, `SitemapEntry`) |
//! | [`output`] | CLI summary formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Root and Config
//!
//! Nothing reads the process working directory or global state. The scan root
//! and the [`config::SitemapConfig`] are parameters, so tests point at a temp
//! directory with an injected config.
//!
//! ## First-Match Rules
//!
//! Classification rules are an ordered list, not a map. The first rule whose
//! pattern is a substring of the page path wins, even if a later rule is more
//! specific. Put specific patterns first.

pub mod config;
pub mod generate;
pub mod mapping;
pub mod output;
pub mod scan;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
