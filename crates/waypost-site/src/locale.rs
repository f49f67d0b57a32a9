//! Locale table and locale resolution.
//!
//! Locales are keyed by a URL path prefix. The prefix `/` is the default
//! locale and must be present whenever any locale is configured.

use serde::{Deserialize, Serialize};

use crate::prefix::longest_prefix;

/// Path prefix of the default locale.
pub const ROOT_PREFIX: &str = "/";

/// Display metadata for one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Path prefix served by this locale (e.g. `/`, `/en/`).
    pub path_prefix: String,
    /// Language tag set as the `<html lang>` attribute.
    pub lang: String,
    /// Site title for this locale.
    pub title: String,
    /// Site description for this locale.
    #[serde(default)]
    pub description: String,
}

impl LocaleConfig {
    /// Create a locale for `path_prefix`.
    #[must_use]
    pub fn new(
        path_prefix: impl Into<String>,
        lang: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            lang: lang.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Whether this is the default locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path_prefix == ROOT_PREFIX
    }
}

/// Resolve the locale serving `path`.
///
/// Picks the locale with the longest prefix of `path`, falling back to the
/// locale registered at `/`. Returns `None` only when no locale matches and
/// none is registered at `/`, which a validated table rules out unless it is
/// empty.
#[must_use]
pub fn resolve_locale<'a>(path: &str, locales: &'a [LocaleConfig]) -> Option<&'a LocaleConfig> {
    longest_prefix(
        path,
        locales
            .iter()
            .map(|locale| (locale.path_prefix.as_str(), locale)),
    )
    .map(|(_, locale)| locale)
    .or_else(|| locales.iter().find(|locale| locale.is_root()))
}
