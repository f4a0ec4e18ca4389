// src/page/url.rs
// =============================================================================
// The URL type that flows through the whole crawler.
//
// Every URL the crawler touches (the seed, links found on pages, keys of the
// result map) is a PageUrl. It is always:
// - absolute
// - http or https
// - without a #fragment (fragments never change what the server returns)
//
// Normalization is whatever the `url` crate does on parse (lowercase scheme
// and host, drop default ports, "/" for an empty path, resolve ./ and ../)
// plus stripping the fragment. So these are all the same page:
//   https://A.com   https://a.com/   https://a.com:443/#top
// =============================================================================

use std::fmt;

use thiserror::Error;
use url::Url;

/// Why a string could not become a [`PageUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("invalid URL '{input}': {reason}")]
    Invalid { input: String, reason: String },

    #[error("unsupported scheme '{scheme}' in '{input}' (only http and https can be crawled)")]
    UnsupportedScheme { input: String, scheme: String },

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// An absolute, normalized http(s) address of a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageUrl(Url);

impl PageUrl {
    /// Parses an absolute URL string.
    ///
    /// Relative references are rejected here; use [`PageUrl::resolve`] for
    /// those.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input.trim()).map_err(|e| UrlError::Invalid {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(url).map_err(|err| match err {
            // Report the caller's original text, not the normalized form
            UrlError::UnsupportedScheme { scheme, .. } => UrlError::UnsupportedScheme {
                input: input.to_string(),
                scheme,
            },
            UrlError::MissingHost(_) => UrlError::MissingHost(input.to_string()),
            other => other,
        })
    }

    fn from_url(mut url: Url) -> Result<Self, UrlError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UrlError::UnsupportedScheme {
                input: url.to_string(),
                scheme: url.scheme().to_string(),
            });
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost(url.to_string()));
        }
        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Resolves a reference found on this page into an absolute page URL.
    ///
    /// Handles everything a browser would: `../x`, `/x`, `//host/x`, `?q`,
    /// `#frag` and fully absolute URLs. Returns `None` when the reference
    /// can't be joined or points at something that isn't http(s)
    /// (mailto:, javascript:, tel:, data:, ...).
    pub fn resolve(&self, reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        let joined = self.0.join(reference).ok()?;
        Self::from_url(joined).ok()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Host name, e.g. `docs.rust-lang.org`. Always present for a PageUrl.
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::str::FromStr for PageUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
