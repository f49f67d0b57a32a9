//! Navigation tree model and active-entry resolution.
//!
//! A nav tree is an ordered list of [`NavEntry`] values. Each entry is either
//! a leaf link or a submenu; submenus nest to arbitrary depth.

use serde::{Deserialize, Serialize};

/// Navigation bar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Display text.
    pub text: String,
    /// Link target. Set on leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Submenu entries, in rendering order.
    #[serde(default, alias = "items", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Create a leaf entry linking to `link`.
    #[must_use]
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            children: Vec::new(),
        }
    }

    /// Create a submenu entry.
    #[must_use]
    pub fn menu(text: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self {
            text: text.into(),
            link: None,
            children,
        }
    }

    /// Leaf link target, or `None` for submenus and empty links.
    #[must_use]
    pub fn leaf_link(&self) -> Option<&str> {
        if self.children.is_empty() {
            self.link.as_deref().filter(|link| !link.is_empty())
        } else {
            None
        }
    }
}

/// Resolve the active nav entry for `path`.
///
/// Returns the chain of entries from the top-level entry down to the matched
/// leaf, or an empty chain when no leaf matches. A leaf matches when its link
/// is a literal prefix of `path`; the longest link wins and ties go to the
/// leaf seen first in a pre-order walk.
#[must_use]
pub fn resolve_active_nav<'a>(path: &str, entries: &'a [NavEntry]) -> Vec<&'a NavEntry> {
    let mut chain = Vec::new();
    let mut best = None;
    visit(path, entries, &mut chain, &mut best);
    best.map(|(_, chain)| chain).unwrap_or_default()
}

/// Pre-order walk recording the best leaf match and its ancestors.
fn visit<'a>(
    path: &str,
    entries: &'a [NavEntry],
    chain: &mut Vec<&'a NavEntry>,
    best: &mut Option<(usize, Vec<&'a NavEntry>)>,
) {
    for entry in entries {
        chain.push(entry);
        if let Some(link) = entry.leaf_link() {
            if path.starts_with(link) && best.as_ref().is_none_or(|(len, _)| link.len() > *len) {
                *best = Some((link.len(), chain.clone()));
            }
        } else if !entry.children.is_empty() {
            visit(path, &entry.children, chain, best);
        }
        chain.pop();
    }
}
