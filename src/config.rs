//! Builder configuration shared across a document's resource tree.
//!
//! The base URL and any project-specific additions to the language and
//! media-type registries live here. A [`BuilderConfig`] is created once,
//! wrapped in an [`Arc`], handed to the root resource constructor and
//! inherited by every child created through an `add_*` method, so a tree can
//! be built from several threads without racing on process-wide state.

use std::sync::Arc;

use crate::error::Error;
use crate::vocab::{bcp47, media_types};

/// Characters that must be percent-encoded in a resource identifier.
///
/// The comma is deliberately absent: the IIIF Image API uses it in region and
/// size parameters. The URI scheme is stripped before the scan so its colon
/// and slashes are not flagged.
const INVALID_URI_CHARACTERS: &str = "!\"$%&'()*+ :;<=>?@[\\]^`{|}~";

/// Configuration consulted by `set_id`, `add_label` and `set_format`.
#[derive(Clone, Debug)]
pub struct BuilderConfig {
    base_url: String,
    extra_languages: Vec<String>,
    extra_media_types: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new("https://")
    }
}

impl BuilderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            extra_languages: Vec::new(),
            extra_media_types: Vec::new(),
        }
    }

    /// Convenience for the common case: a shared config ready to pass to
    /// resource constructors.
    pub fn shared(base_url: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a language tag beyond the built-in BCP 47 snapshot.
    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.extra_languages.push(tag.into());
        self
    }

    /// Registers a media type beyond the built-in IANA snapshot.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.extra_media_types.push(media_type.into());
        self
    }

    /// Checks a language tag: the literal `"none"`, a registered BCP 47
    /// primary subtag (`pt-BR` is checked as `pt`), or a configured extra.
    pub(crate) fn check_language(&self, tag: &str) -> Result<(), Error> {
        if tag == "none" {
            return Ok(());
        }
        if self.extra_languages.iter().any(|t| t == tag) {
            return Ok(());
        }
        let primary = tag.split('-').next().unwrap_or(tag);
        if bcp47::primary_subtag_registered(primary) {
            Ok(())
        } else {
            Err(Error::InvalidLanguage(tag.to_string()))
        }
    }

    /// Checks a media type against the IANA snapshot plus configured extras.
    pub(crate) fn check_media_type(&self, value: &str) -> Result<(), Error> {
        if self.extra_media_types.iter().any(|t| t == value) {
            return Ok(());
        }
        media_types::check(value)
    }

    /// Joins the base URL with a suffix. One of the two sides must provide
    /// the separating slash.
    pub(crate) fn resolve(&self, suffix: &str) -> Result<String, Error> {
        if !self.base_url.ends_with('/') && !suffix.starts_with('/') {
            return Err(Error::InvalidArgument(format!(
                "cannot join base URL `{}` with `{}`: add a trailing slash to the base URL or a leading slash to the suffix",
                self.base_url, suffix
            )));
        }
        let joined = format!("{}{}", self.base_url, suffix);
        check_uri(&joined)?;
        Ok(joined)
    }
}

/// Scans a URI for characters that must be percent-encoded.
///
/// Mirrors the scheme-stripping of the original check: `https:/` and `http:/`
/// are each removed once before the scan, so only the authority and path are
/// inspected.
pub(crate) fn check_uri(uri: &str) -> Result<(), Error> {
    let stripped = uri
        .strip_prefix("https:/")
        .or_else(|| uri.strip_prefix("http:/"))
        .unwrap_or(uri);
    for (index, ch) in stripped.char_indices() {
        if INVALID_URI_CHARACTERS.contains(ch) {
            let shown = if ch == ' ' { "a space".to_string() } else { format!("`{ch}`") };
            return Err(Error::MalformedUri {
                uri: uri.to_string(),
                reason: format!("{shown} at position {index} must be percent-encoded"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_requires_a_slash() {
        let config = BuilderConfig::new("https://example.org");
        assert!(config.resolve("manifest.json").is_err());
        assert_eq!(
            config.resolve("/manifest.json").unwrap(),
            "https://example.org/manifest.json"
        );

        let config = BuilderConfig::new("https://example.org/");
        assert_eq!(
            config.resolve("manifest.json").unwrap(),
            "https://example.org/manifest.json"
        );
    }

    #[test]
    fn check_uri_rejects_unencoded_characters() {
        assert!(check_uri("https://example.org/man ifest").is_err());
        assert!(check_uri("https://example.org/a;b").is_err());
        assert!(check_uri("https://example.org/manifest.json").is_ok());
        // The IIIF Image API uses commas in size/region parameters.
        assert!(check_uri("https://example.org/full/100,100/0/default.jpg").is_ok());
    }

    #[test]
    fn check_uri_ignores_the_scheme() {
        // The colon and double slash of the scheme itself are not flagged.
        assert!(check_uri("https://example.org/path").is_ok());
        assert!(check_uri("http://example.org/path").is_ok());
    }

    #[test]
    fn language_checks_primary_subtag() {
        let config = BuilderConfig::default();
        assert!(config.check_language("en").is_ok());
        assert!(config.check_language("pt-BR").is_ok());
        assert!(config.check_language("none").is_ok());
        assert!(config.check_language("klingon").is_err());
    }

    #[test]
    fn extra_languages_are_exact_matches() {
        let config = BuilderConfig::default().with_language("x-internal");
        assert!(config.check_language("x-internal").is_ok());
        assert!(config.check_language("x-other").is_err());
    }
}
