//! Page path to URL and classification mapping.
//!
//! Stage 2 of the sitemap pipeline. Pure functions: no I/O, no errors. Every
//! path produces a URL and a classification.
//!
//! ## URLs
//!
//! | Relative path | URL |
//! |---------------|-----|
//! | `index.html` | `{base}/` |
//! | `services/index.html` | `{base}/services/` |
//! | `blog/post-1.html` | `{base}/blog/post-1.html` |
//!
//! ## Classification
//!
//! Rules are tried in declaration order against `"/" + relative_path` and the
//! first rule whose pattern occurs anywhere in it wins. This is a substring
//! test, not a prefix or segment match, and an early broad pattern shadows
//! any later, more specific one. With the stock rules `/index.html` comes
//! first, so `services/index.html` is classified by it rather than by
//! `/services/`.

use crate::config::{SitemapConfig, UrlRule};
use crate::types::Classification;
use std::path::Path;
use tracing::debug;

const INDEX_FILE: &str = "index.html";

/// Convert a path under `root` into a root-relative, `/`-separated path with
/// no leading slash.
///
/// Paths outside `root` are returned whole, normalized the same way.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    let normalized = stripped.to_string_lossy().replace('\\', "/");
    match normalized.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// Public URL for a root-relative page path.
///
/// `index.html` files address their containing directory.
pub fn page_url(base_url: &str, relative: &str) -> String {
    let relative = relative.strip_prefix('/').unwrap_or(relative);
    let path = if relative == INDEX_FILE {
        String::new()
    } else if let Some(dir) = relative.strip_suffix("/index.html") {
        format!("{dir}/")
    } else {
        relative.to_string()
    };
    format!("{base_url}/{path}")
}

/// First rule whose pattern occurs in `"/" + relative`, if any.
pub fn matching_rule<'a>(rules: &'a [UrlRule], relative: &str) -> Option<&'a UrlRule> {
    let path = format!("/{}", relative.trim_start_matches('/'));
    rules.iter().find(|rule| path.contains(rule.pattern.as_str()))
}

/// Classify a page, falling back to `default` when no rule matches.
pub fn classify(rules: &[UrlRule], default: &Classification, relative: &str) -> Classification {
    match matching_rule(rules, relative) {
        Some(rule) => {
            debug!(page = %relative, pattern = %rule.pattern, "matched rule");
            rule.classification()
        }
        None => default.clone(),
    }
}

/// URL mapper bound to one configuration.
#[derive(Debug)]
pub struct UrlMapper<'a> {
    config: &'a SitemapConfig,
    default: Classification,
}

impl<'a> UrlMapper<'a> {
    pub fn new(config: &'a SitemapConfig) -> Self {
        Self {
            config,
            default: config.default_classification(),
        }
    }

    pub fn url(&self, relative: &str) -> String {
        page_url(&self.config.base_url, relative)
    }

    pub fn classify(&self, relative: &str) -> Classification {
        classify(&self.config.rules, &self.default, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeFrequency;
    use std::path::PathBuf;

    const BASE: &str = "https://example.com";

    fn rule(pattern: &str, priority: &str, changefreq: ChangeFrequency) -> UrlRule {
        UrlRule {
            pattern: pattern.to_string(),
            priority: priority.to_string(),
            changefreq,
        }
    }

    fn fallback() -> Classification {
        Classification {
            priority: "0.6".to_string(),
            changefreq: ChangeFrequency::Monthly,
        }
    }

    // =========================================================================
    // Relative paths
    // =========================================================================

    #[test]
    fn relative_path_strips_root() {
        let root = PathBuf::from("/srv/site");
        assert_eq!(
            relative_path(&root, &root.join("services").join("index.html")),
            "services/index.html"
        );
    }

    #[test]
    fn relative_path_of_root_is_empty() {
        let root = PathBuf::from("/srv/site");
        assert_eq!(relative_path(&root, &root), "");
    }

    #[test]
    fn relative_path_outside_root_drops_leading_slash() {
        let root = PathBuf::from("/srv/site");
        assert_eq!(
            relative_path(&root, Path::new("/elsewhere/a.html")),
            "elsewhere/a.html"
        );
    }

    #[test]
    fn relative_path_normalizes_backslashes() {
        let root = PathBuf::from("/srv/site");
        assert_eq!(
            relative_path(&root, Path::new(r"/srv/site/blog\post-1.html")),
            "blog/post-1.html"
        );
    }

    // =========================================================================
    // URLs
    // =========================================================================

    #[test]
    fn root_index_maps_to_site_root() {
        assert_eq!(page_url(BASE, "index.html"), "https://example.com/");
    }

    #[test]
    fn nested_index_maps_to_directory() {
        let url = page_url(BASE, "services/index.html");
        assert_eq!(url, "https://example.com/services/");
        assert!(url.ends_with('/'));
        assert!(!url.contains("index.html"));
    }

    #[test]
    fn deep_index_maps_to_directory() {
        assert_eq!(
            page_url(BASE, "a/b/c/index.html"),
            "https://example.com/a/b/c/"
        );
    }

    #[test]
    fn plain_page_keeps_file_name() {
        assert_eq!(
            page_url(BASE, "blog/post-1.html"),
            "https://example.com/blog/post-1.html"
        );
    }

    #[test]
    fn index_suffix_only_rewritten_at_segment_boundary() {
        assert_eq!(
            page_url(BASE, "blog/myindex.html"),
            "https://example.com/blog/myindex.html"
        );
        assert_eq!(
            page_url(BASE, "index.html/page.html"),
            "https://example.com/index.html/page.html"
        );
    }

    #[test]
    fn leading_slash_is_stripped() {
        assert_eq!(
            page_url(BASE, "/about/index.html"),
            "https://example.com/about/"
        );
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            rule("/services/", "0.9", ChangeFrequency::Monthly),
            rule("/services/lawn", "0.3", ChangeFrequency::Daily),
        ];
        let c = classify(&rules, &fallback(), "services/lawn-care.html");
        assert_eq!(c.priority, "0.9");
        assert_eq!(c.changefreq, ChangeFrequency::Monthly);
    }

    #[test]
    fn declaration_order_not_specificity_decides() {
        let rules = vec![
            rule("/services/lawn", "0.3", ChangeFrequency::Daily),
            rule("/services/", "0.9", ChangeFrequency::Monthly),
        ];
        let c = classify(&rules, &fallback(), "services/lawn-care.html");
        assert_eq!(c.priority, "0.3");
        assert_eq!(c.changefreq, ChangeFrequency::Daily);
    }

    #[test]
    fn stock_index_rule_shadows_section_rules() {
        let config = SitemapConfig::default();
        let mapper = UrlMapper::new(&config);
        let c = mapper.classify("services/index.html");
        assert_eq!(c.priority, "1.0");
        assert_eq!(c.changefreq, ChangeFrequency::Weekly);
    }

    #[test]
    fn stock_section_rule_applies_to_non_index_pages() {
        let config = SitemapConfig::default();
        let mapper = UrlMapper::new(&config);
        let c = mapper.classify("services/lawn-care.html");
        assert_eq!(c.priority, "0.9");
        assert_eq!(c.changefreq, ChangeFrequency::Monthly);
    }

    #[test]
    fn unmatched_path_gets_default_verbatim() {
        let config = SitemapConfig::default();
        let mapper = UrlMapper::new(&config);
        assert_eq!(mapper.classify("blog/post-1.html"), fallback());
    }

    #[test]
    fn substring_match_is_unanchored() {
        let rules = vec![rule("/services/", "0.9", ChangeFrequency::Monthly)];
        let nested = classify(&rules, &fallback(), "region/services/a.html");
        assert_eq!(nested.priority, "0.9");

        let hyphenated = classify(&rules, &fallback(), "about-services/a.html");
        assert_eq!(hyphenated, fallback());
    }

    #[test]
    fn root_index_matches_index_rule() {
        let config = SitemapConfig::default();
        let rule = matching_rule(&config.rules, "index.html").unwrap();
        assert_eq!(rule.pattern, "/index.html");
    }

    #[test]
    fn no_rules_means_default() {
        assert_eq!(classify(&[], &fallback(), "index.html"), fallback());
    }

    #[test]
    fn mapper_uses_configured_base_url() {
        let config = SitemapConfig {
            base_url: BASE.to_string(),
            ..SitemapConfig::default()
        };
        let mapper = UrlMapper::new(&config);
        assert_eq!(
            mapper.url("pricing/index.html"),
            "https://example.com/pricing/"
        );
    }
}
