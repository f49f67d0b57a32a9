//! Sidebar table model and sidebar resolution.
//!
//! A [`SidebarTable`] maps URL path prefixes to sidebar definitions. Each
//! definition is either an explicit list of entries (flat page slugs or
//! named groups) or [`SidebarValue::Auto`], which leaves sidebar
//! construction to the renderer's heading index.
//!
//! # Slugs
//!
//! Slugs are relative to the table prefix: `""` is the prefix's index page,
//! `"install"` becomes `/guide/install` under `/guide/`. A slug that already
//! starts with `/` is absolute and kept as written.

use serde::{Deserialize, Serialize};

use crate::prefix::longest_prefix;

/// Named, optionally collapsible cluster of sidebar pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub title: String,
    /// Render collapsed by default. A hint for the renderer only.
    #[serde(default = "default_collapsible", alias = "collapsable")]
    pub collapsible: bool,
    /// Page slugs in display order.
    #[serde(default)]
    pub children: Vec<String>,
}

fn default_collapsible() -> bool {
    true
}

/// One item of an explicit sidebar list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Bare page slug (flat mode).
    Page(String),
    /// Page group (grouped mode).
    Group(SidebarGroup),
}

impl SidebarEntry {
    /// Create a flat page entry.
    #[must_use]
    pub fn page(slug: impl Into<String>) -> Self {
        Self::Page(slug.into())
    }

    /// Create a group entry.
    #[must_use]
    pub fn group<S: Into<String>>(
        title: impl Into<String>,
        collapsible: bool,
        children: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::Group(SidebarGroup {
            title: title.into(),
            collapsible,
            children: children.into_iter().map(Into::into).collect(),
        })
    }

    /// Whether this entry is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Copy of this entry with every slug made absolute under `prefix`.
    fn resolve(&self, prefix: &str) -> Self {
        match self {
            Self::Page(slug) => Self::Page(absolute_slug(prefix, slug)),
            Self::Group(group) => Self::Group(SidebarGroup {
                title: group.title.clone(),
                collapsible: group.collapsible,
                children: group
                    .children
                    .iter()
                    .map(|slug| absolute_slug(prefix, slug))
                    .collect(),
            }),
        }
    }
}

/// Join a slug onto its table prefix.
fn absolute_slug(prefix: &str, slug: &str) -> String {
    if slug.starts_with('/') {
        slug.to_owned()
    } else {
        format!("{prefix}{slug}")
    }
}

/// Sidebar definition registered under one prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarValue {
    /// Derive the sidebar from in-page headings.
    Auto,
    /// Explicit entries in display order.
    Entries(Vec<SidebarEntry>),
}

/// Ordered mapping from path prefix to [`SidebarValue`].
///
/// The table keeps entries exactly as inserted, duplicates included, so that
/// validation can report them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarTable {
    entries: Vec<(String, SidebarValue)>,
}

impl SidebarTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style.
    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>, value: SidebarValue) -> Self {
        self.insert(prefix, value);
        self
    }

    /// Append an entry.
    pub fn insert(&mut self, prefix: impl Into<String>, value: SidebarValue) {
        self.entries.push((prefix.into(), value));
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SidebarValue)> {
        self.entries
            .iter()
            .map(|(prefix, value)| (prefix.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SidebarValue)> for SidebarTable {
    fn from_iter<I: IntoIterator<Item = (String, SidebarValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of sidebar resolution for one path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "entries", rename_all = "lowercase")]
pub enum SidebarResolution {
    /// Explicit entries with absolute paths.
    Explicit(Vec<SidebarEntry>),
    /// The renderer builds the sidebar from page headings.
    Auto,
    /// No sidebar for this page.
    None,
}

impl SidebarResolution {
    /// Whether the page has no sidebar.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Resolve the sidebar for `path`.
///
/// Selects the longest table prefix of `path`. Explicit entries come back
/// with absolute slugs in declaration order; `Auto` is returned as is.
#[must_use]
pub fn resolve_sidebar(path: &str, table: &SidebarTable) -> SidebarResolution {
    match longest_prefix(path, table.iter()) {
        None => SidebarResolution::None,
        Some((_, SidebarValue::Auto)) => SidebarResolution::Auto,
        Some((prefix, SidebarValue::Entries(entries))) => SidebarResolution::Explicit(
            entries.iter().map(|entry| entry.resolve(prefix)).collect(),
        ),
    }
}
