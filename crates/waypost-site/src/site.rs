//! Site configuration aggregate and the resolution engine.
//!
//! [`SiteConfig`] is the plain data handed over by a configuration loader.
//! [`Site`] is the validated, frozen form that answers per-page queries.
//!
//! # Thread Safety
//!
//! `Site` holds no interior mutability. Every query borrows it immutably, so
//! one instance can be shared behind an `Arc` by any number of render
//! workers without locking.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::edit_link::EditLinks;
use crate::locale::{LocaleConfig, ROOT_PREFIX, resolve_locale};
use crate::nav::{NavEntry, resolve_active_nav};
use crate::sidebar::{SidebarResolution, SidebarTable, resolve_sidebar};
use crate::validate::{ValidationError, validate};

/// Default heading depth for auto sidebars.
pub const DEFAULT_SIDEBAR_DEPTH: u8 = 1;

/// Default site language tag.
pub const DEFAULT_LANG: &str = "en-US";

/// Site navigation configuration as loaded, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site title. Used for the implicit default locale.
    pub title: String,
    /// Site description. Used for the implicit default locale.
    pub description: String,
    /// Site language tag. Used for the implicit default locale.
    pub lang: String,
    /// Default navigation tree.
    pub nav: Vec<NavEntry>,
    /// Default sidebar table.
    pub sidebar: SidebarTable,
    /// Locale table in declaration order. Empty when the site is monolingual.
    pub locales: Vec<LocaleConfig>,
    /// Navigation overrides keyed by locale prefix.
    pub locale_nav: HashMap<String, Vec<NavEntry>>,
    /// Sidebar overrides keyed by locale prefix.
    pub locale_sidebar: HashMap<String, SidebarTable>,
    /// Plugin identifiers, passed through untouched.
    pub plugins: Vec<String>,
    /// Edit link settings, `None` when edit links are disabled.
    pub edit_links: Option<EditLinks>,
    /// Heading depth shown in auto sidebars.
    pub sidebar_depth: u8,
    /// "Last updated" label, `None` to hide timestamps.
    pub last_updated: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            lang: DEFAULT_LANG.to_owned(),
            nav: Vec::new(),
            sidebar: SidebarTable::new(),
            locales: Vec::new(),
            locale_nav: HashMap::new(),
            locale_sidebar: HashMap::new(),
            plugins: Vec::new(),
            edit_links: None,
            sidebar_depth: DEFAULT_SIDEBAR_DEPTH,
            last_updated: None,
        }
    }
}

/// Everything the renderer needs to know about one page's navigation.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PageContext<'a> {
    /// Requested path.
    pub path: String,
    /// Locale serving the page.
    pub locale: &'a LocaleConfig,
    /// Active nav chain from top-level entry to matched leaf.
    #[serde(serialize_with = "serialize_nav_chain")]
    pub active_nav: Vec<&'a NavEntry>,
    /// Sidebar for the page.
    pub sidebar: SidebarResolution,
    /// Heading depth for auto sidebars.
    pub sidebar_depth: u8,
    /// Edit URL, if edit links are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<String>,
    /// Edit link label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link_text: Option<&'a str>,
    /// "Last updated" label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<&'a str>,
}

/// Nav chain element as seen by the renderer: no submenu contents.
#[derive(Serialize)]
struct NavCrumb<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
}

fn serialize_nav_chain<S: Serializer>(
    chain: &[&NavEntry],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(chain.iter().map(|entry| NavCrumb {
        text: &entry.text,
        link: entry.link.as_deref(),
    }))
}

/// Validated, immutable site navigation.
///
/// Built once from a [`SiteConfig`]; construction fails if the
/// configuration does not validate, so a `Site` is never partially valid.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    /// Stand-in default locale for sites without a locale table.
    implicit_locale: LocaleConfig,
}

impl Site {
    /// Validate `config` and freeze it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found in `config`.
    pub fn new(config: SiteConfig) -> Result<Self, ValidationError> {
        validate(&config)?;

        let implicit_locale = LocaleConfig::new(
            ROOT_PREFIX,
            config.lang.clone(),
            config.title.clone(),
            config.description.clone(),
        );

        tracing::debug!(
            nav_entries = config.nav.len(),
            sidebars = config.sidebar.len(),
            locales = config.locales.len(),
            plugins = config.plugins.len(),
            "Site navigation frozen"
        );

        Ok(Self {
            config,
            implicit_locale,
        })
    }

    /// Underlying configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Plugin identifiers in declaration order.
    #[must_use]
    pub fn plugins(&self) -> &[String] {
        &self.config.plugins
    }

    /// Locale serving `path`.
    ///
    /// Sites without a locale table get an implicit `/` locale built from
    /// the site title, description and language.
    #[must_use]
    pub fn resolve_locale(&self, path: &str) -> &LocaleConfig {
        resolve_locale(path, &self.config.locales).unwrap_or(&self.implicit_locale)
    }

    /// Active nav chain for `path`, using the locale's nav override if any.
    #[must_use]
    pub fn resolve_active_nav(&self, path: &str) -> Vec<&NavEntry> {
        let locale = self.resolve_locale(path);
        let nav = self
            .config
            .locale_nav
            .get(locale.path_prefix.as_str())
            .unwrap_or(&self.config.nav);
        resolve_active_nav(path, nav)
    }

    /// Sidebar for `path`, using the locale's sidebar override if any.
    #[must_use]
    pub fn resolve_sidebar(&self, path: &str) -> SidebarResolution {
        let locale = self.resolve_locale(path);
        let table = self
            .config
            .locale_sidebar
            .get(locale.path_prefix.as_str())
            .unwrap_or(&self.config.sidebar);
        resolve_sidebar(path, table)
    }

    /// Edit URL for `path`, or `None` when edit links are disabled.
    #[must_use]
    pub fn edit_link(&self, path: &str) -> Option<String> {
        self.config
            .edit_links
            .as_ref()
            .map(|links| links.url_for(path))
    }

    /// Resolve everything the renderer needs for `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PageContext<'_> {
        tracing::trace!(path, "Resolving page navigation");

        PageContext {
            path: path.to_owned(),
            locale: self.resolve_locale(path),
            active_nav: self.resolve_active_nav(path),
            sidebar: self.resolve_sidebar(path),
            sidebar_depth: self.config.sidebar_depth,
            edit_link: self.edit_link(path),
            edit_link_text: self
                .config
                .edit_links
                .as_ref()
                .and_then(|links| links.text.as_deref()),
            last_updated: self.config.last_updated.as_deref(),
        }
    }
}
