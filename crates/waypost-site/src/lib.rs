//! Navigation and sidebar resolution for Waypost.
//!
//! This crate provides:
//! - [`SiteConfig`]: nav tree, sidebar table, locales and pass-through settings
//! - [`Site`]: the validated, frozen configuration answering per-page queries
//! - Free resolver functions ([`resolve_locale`], [`resolve_active_nav`],
//!   [`resolve_sidebar`]) over explicit inputs
//! - [`validate`] and [`collect_problems`] for load-time checks
//!
//! Locale and sidebar lookups share one rule: the longest registered prefix
//! of the requested path wins.
//!
//! # Quick Start
//!
//! ```
//! use waypost_site::{
//!     NavEntry, SidebarEntry, SidebarResolution, SidebarTable, SidebarValue, Site, SiteConfig,
//! };
//!
//! let config = SiteConfig {
//!     nav: vec![
//!         NavEntry::link("Frontend", "/frontEnd/"),
//!         NavEntry::link("JS", "/frontEnd/js/"),
//!     ],
//!     sidebar: SidebarTable::new().with(
//!         "/frontEnd/js/",
//!         SidebarValue::Entries(vec![SidebarEntry::page(""), SidebarEntry::page("js01")]),
//!     ),
//!     ..Default::default()
//! };
//! let site = Site::new(config)?;
//!
//! let nav = site.resolve_active_nav("/frontEnd/js/js01.html");
//! assert_eq!(nav.last().map(|entry| entry.text.as_str()), Some("JS"));
//!
//! let sidebar = site.resolve_sidebar("/frontEnd/js/js01.html");
//! assert_eq!(
//!     sidebar,
//!     SidebarResolution::Explicit(vec![
//!         SidebarEntry::page("/frontEnd/js/"),
//!         SidebarEntry::page("/frontEnd/js/js01"),
//!     ])
//! );
//! # Ok::<(), waypost_site::ValidationError>(())
//! ```

mod edit_link;
mod locale;
mod nav;
mod prefix;
mod sidebar;
mod site;
mod validate;

pub use edit_link::{DEFAULT_BRANCH, EditLinks, repo_url};
pub use locale::{LocaleConfig, ROOT_PREFIX, resolve_locale};
pub use nav::{NavEntry, resolve_active_nav};
pub use sidebar::{
    SidebarEntry, SidebarGroup, SidebarResolution, SidebarTable, SidebarValue, resolve_sidebar,
};
pub use site::{DEFAULT_LANG, DEFAULT_SIDEBAR_DEPTH, PageContext, Site, SiteConfig};
pub use validate::{ValidationError, ValidationErrorKind, collect_problems, validate};
