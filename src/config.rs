//! Sitemap configuration.
//!
//! Everything the generator needs to know lives in one immutable
//! [`SitemapConfig`] value: the public base URL, the output file, the exclusion
//! patterns used while scanning, and the ordered classification rules.
//!
//! ## Layers
//!
//! ```text
//! compiled-in defaults          (SitemapConfig::default)
//!   ← sitemap.toml / --config   (sparse overrides, deep-merged)
//!   ← --base-url / --output     (CLI flags)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! base_url = "https://scoopster.ca"   # No trailing slash
//! output_file = "sitemap.xml"         # Relative to the scan root
//! exclude_patterns = ["node_modules", "\\.git", "404\\.html"]
//! default_priority = "0.6"
//! default_changefreq = "monthly"
//!
//! [[rules]]
//! pattern = "/index.html"
//! priority = "1.0"
//! changefreq = "weekly"
//! ```
//!
//! `rules` is an array, not a table, because its order matters: the first
//! rule whose pattern occurs in a page's path wins. Overriding `rules` replaces
//! the whole list.
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::{ChangeFrequency, Classification};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// File name looked up in the scan root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "sitemap.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Sitemap generator configuration.
///
/// All fields have defaults. User config files only need the keys they want
/// to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Prefix for every URL, without a trailing slash.
    pub base_url: String,
    /// Destination of the generated document, relative to the scan root.
    pub output_file: String,
    /// Regular expressions matched against root-relative paths during the scan.
    pub exclude_patterns: Vec<String>,
    /// Classification rules, consulted in order.
    pub rules: Vec<UrlRule>,
    /// Priority for pages no rule matches.
    pub default_priority: String,
    /// Change frequency for pages no rule matches.
    pub default_changefreq: ChangeFrequency,
}

/// Maps a path substring to a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlRule {
    /// Substring tested against the page path (with a leading `/`).
    pub pattern: String,
    pub priority: String,
    pub changefreq: ChangeFrequency,
}

impl UrlRule {
    fn new(pattern: &str, priority: &str, changefreq: ChangeFrequency) -> Self {
        Self {
            pattern: pattern.to_string(),
            priority: priority.to_string(),
            changefreq,
        }
    }

    pub fn classification(&self) -> Classification {
        Classification {
            priority: self.priority.clone(),
            changefreq: self.changefreq,
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        use ChangeFrequency::{Monthly, Weekly};
        Self {
            base_url: "https://scoopster.ca".to_string(),
            output_file: "sitemap.xml".to_string(),
            exclude_patterns: vec![
                "node_modules".to_string(),
                r"\.git".to_string(),
                r"404\.html".to_string(),
            ],
            rules: vec![
                UrlRule::new("/index.html", "1.0", Weekly),
                UrlRule::new("/services/", "0.9", Monthly),
                UrlRule::new("/service-areas/", "0.9", Monthly),
                UrlRule::new("/pricing/", "0.8", Monthly),
                UrlRule::new("/about/", "0.7", Monthly),
                UrlRule::new("/contact/", "0.8", Monthly),
            ],
            default_priority: "0.6".to_string(),
            default_changefreq: Monthly,
        }
    }
}

impl SitemapConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.base_url)?;
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_file must not be empty".into(),
            ));
        }
        validate_priority("default_priority", &self.default_priority)?;
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "rules[{i}].pattern must not be empty"
                )));
            }
            validate_priority(&format!("rules[{i}].priority"), &rule.priority)?;
        }
        self.exclude_set()?;
        Ok(())
    }

    /// Classification applied when no rule matches.
    pub fn default_classification(&self) -> Classification {
        Classification {
            priority: self.default_priority.clone(),
            changefreq: self.default_changefreq,
        }
    }

    /// Compile `exclude_patterns` for the scanner.
    pub fn exclude_set(&self) -> Result<ExcludeSet, ConfigError> {
        ExcludeSet::new(&self.exclude_patterns)
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        output_file: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(output_file) = output_file {
            self.output_file = output_file;
        }
        self.validate()?;
        Ok(self)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(base_url).map_err(|e| {
        ConfigError::Validation(format!("base_url {base_url:?} is not a valid URL: {e}"))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "base_url must use http or https, got {:?}",
            parsed.scheme()
        )));
    }
    if base_url.ends_with('/') {
        return Err(ConfigError::Validation(
            "base_url must not end with '/'".into(),
        ));
    }
    Ok(())
}

fn validate_priority(field: &str, value: &str) -> Result<(), ConfigError> {
    match value.parse::<f64>() {
        Ok(p) if (0.0..=1.0).contains(&p) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be a number between 0.0 and 1.0, got {value:?}"
        ))),
    }
}

/// Compiled exclusion patterns.
///
/// A path is excluded when any pattern matches anywhere in it.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    patterns: Vec<Regex>,
}

impl ExcludeSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| ConfigError::Pattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if `path` (root-relative, `/`-separated) matches any pattern.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the compiled-in defaults as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SitemapConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Arrays and scalars in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SitemapConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SitemapConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective configuration for a scan root.
///
/// An explicit `config_path` must exist. Without one, `sitemap.toml` in the
/// root is used if present, and the compiled-in defaults otherwise.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<SitemapConfig, ConfigError> {
    let overlay = match config_path {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                Some(load_raw_config(&candidate)?)
            } else {
                None
            }
        }
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `sitemap.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Sitemap Configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Place this file in the site root as sitemap.toml, or pass --config.
# Unknown keys will cause an error.

# Prefix for every URL. Must be http(s) and must not end with '/'.
base_url = "https://scoopster.ca"

# Where to write the sitemap, relative to the site root.
output_file = "sitemap.xml"

# Regular expressions matched against each root-relative path while scanning.
# A matching directory is skipped without being opened.
exclude_patterns = ["node_modules", "\\.git", "404\\.html"]

# Classification for pages that match no rule.
default_priority = "0.6"
default_changefreq = "monthly"

# ---------------------------------------------------------------------------
# Classification rules
# ---------------------------------------------------------------------------
# Each pattern is a plain substring tested against "/" + the page's path.
# Rules are tried top to bottom and the FIRST match wins, so put specific
# patterns above broad ones. Overriding rules replaces the whole list.
# changefreq: always | hourly | daily | weekly | monthly | yearly | never

[[rules]]
pattern = "/index.html"
priority = "1.0"
changefreq = "weekly"

[[rules]]
pattern = "/services/"
priority = "0.9"
changefreq = "monthly"

[[rules]]
pattern = "/service-areas/"
priority = "0.9"
changefreq = "monthly"

[[rules]]
pattern = "/pricing/"
priority = "0.8"
changefreq = "monthly"

[[rules]]
pattern = "/about/"
priority = "0.7"
changefreq = "monthly"

[[rules]]
pattern = "/contact/"
priority = "0.8"
changefreq = "monthly"
"##
}
