//! Load-time validation of a [`SiteConfig`].
//!
//! Checks run over the whole configuration before a [`Site`](crate::Site)
//! is built. [`validate`] stops at the first problem; [`collect_problems`]
//! reports all of them for tooling.

use std::collections::HashSet;

use crate::locale::ROOT_PREFIX;
use crate::nav::NavEntry;
use crate::sidebar::{SidebarTable, SidebarValue};
use crate::site::SiteConfig;

/// Validation error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    /// Two keys of one table are identical.
    DuplicatePrefix,
    /// A sidebar list mixes page slugs and groups.
    MixedSidebarMode,
    /// Locales are configured without one at `/`.
    MissingDefaultLocale,
    /// A nav entry is both a link and a submenu, or neither.
    MalformedNavEntry,
    /// A prefix does not start and end with `/`.
    InvalidPrefix,
    /// An override is registered for a prefix with no locale.
    UnknownLocale,
}

/// Configuration problem found during validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Duplicate key.
    #[error("Duplicate prefix {prefix:?} in {table}")]
    DuplicatePrefix {
        /// Table containing the duplicate (e.g. `sidebar`, `locales`).
        table: String,
        /// The repeated prefix.
        prefix: String,
    },
    /// Mixed flat and grouped sidebar entries.
    #[error("Sidebar {prefix:?} in {table} mixes page slugs and groups")]
    MixedSidebarMode {
        /// Table containing the sidebar.
        table: String,
        /// Prefix of the offending sidebar.
        prefix: String,
    },
    /// No default locale.
    #[error("Locales are configured but none is registered at \"/\"")]
    MissingDefaultLocale,
    /// Nav entry with both or neither of link and children.
    #[error("Malformed nav entry {text:?} at {location}: {reason}")]
    MalformedNavEntry {
        /// Position in the nav tree (e.g. `nav[0].items[2]`).
        location: String,
        /// Entry display text.
        text: String,
        /// What is wrong with the entry.
        reason: &'static str,
    },
    /// Prefix shape error.
    #[error("Invalid prefix {prefix:?} in {table}: must start and end with '/'")]
    InvalidPrefix {
        /// Table containing the prefix.
        table: String,
        /// The offending prefix.
        prefix: String,
    },
    /// Override for an unregistered locale.
    #[error("{table} override registered for unknown locale {prefix:?}")]
    UnknownLocale {
        /// Override kind (`nav` or `sidebar`).
        table: String,
        /// Locale prefix of the override.
        prefix: String,
    },
}

impl ValidationError {
    /// Error category.
    #[must_use]
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::DuplicatePrefix { .. } => ValidationErrorKind::DuplicatePrefix,
            Self::MixedSidebarMode { .. } => ValidationErrorKind::MixedSidebarMode,
            Self::MissingDefaultLocale => ValidationErrorKind::MissingDefaultLocale,
            Self::MalformedNavEntry { .. } => ValidationErrorKind::MalformedNavEntry,
            Self::InvalidPrefix { .. } => ValidationErrorKind::InvalidPrefix,
            Self::UnknownLocale { .. } => ValidationErrorKind::UnknownLocale,
        }
    }
}

/// Validate `config`, returning the first problem found.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in check order: locales, nav trees,
/// sidebar tables.
pub fn validate(config: &SiteConfig) -> Result<(), ValidationError> {
    match collect_problems(config).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Run every check and return all problems in check order.
#[must_use]
pub fn collect_problems(config: &SiteConfig) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    check_locales(config, &mut problems);

    check_nav(&config.nav, "nav", &mut problems);
    let mut locale_navs: Vec<_> = config.locale_nav.iter().collect();
    locale_navs.sort_by_key(|(prefix, _)| prefix.as_str());
    for (prefix, nav) in locale_navs {
        check_nav(nav, &format!("locales.{prefix:?}.nav"), &mut problems);
    }

    check_sidebar(&config.sidebar, "sidebar", &mut problems);
    let mut locale_sidebars: Vec<_> = config.locale_sidebar.iter().collect();
    locale_sidebars.sort_by_key(|(prefix, _)| prefix.as_str());
    for (prefix, table) in locale_sidebars {
        check_sidebar(table, &format!("locales.{prefix:?}.sidebar"), &mut problems);
    }

    problems
}

fn check_locales(config: &SiteConfig, problems: &mut Vec<ValidationError>) {
    if !config.locales.is_empty() && !config.locales.iter().any(|l| l.path_prefix == ROOT_PREFIX)
    {
        problems.push(ValidationError::MissingDefaultLocale);
    }

    check_prefixes(
        config.locales.iter().map(|l| l.path_prefix.as_str()),
        "locales",
        problems,
    );

    let known: HashSet<&str> = config
        .locales
        .iter()
        .map(|l| l.path_prefix.as_str())
        .collect();
    let mut overrides: Vec<(&str, &str)> = config
        .locale_nav
        .keys()
        .map(|prefix| ("nav", prefix.as_str()))
        .chain(
            config
                .locale_sidebar
                .keys()
                .map(|prefix| ("sidebar", prefix.as_str())),
        )
        .collect();
    overrides.sort_unstable();
    for (table, prefix) in overrides {
        if !known.contains(prefix) {
            problems.push(ValidationError::UnknownLocale {
                table: table.to_owned(),
                prefix: prefix.to_owned(),
            });
        }
    }
}

/// Report malformed and duplicate prefixes in declaration order.
fn check_prefixes<'a>(
    prefixes: impl Iterator<Item = &'a str>,
    table: &str,
    problems: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for prefix in prefixes {
        if !prefix.starts_with('/') || !prefix.ends_with('/') {
            problems.push(ValidationError::InvalidPrefix {
                table: table.to_owned(),
                prefix: prefix.to_owned(),
            });
        }
        if !seen.insert(prefix) {
            problems.push(ValidationError::DuplicatePrefix {
                table: table.to_owned(),
                prefix: prefix.to_owned(),
            });
        }
    }
}

fn check_nav(entries: &[NavEntry], location: &str, problems: &mut Vec<ValidationError>) {
    for (i, entry) in entries.iter().enumerate() {
        let here = format!("{location}[{i}]");
        let has_link = entry.link.as_deref().is_some_and(|link| !link.is_empty());
        let has_children = !entry.children.is_empty();

        let reason = match (has_link, has_children) {
            (true, true) => Some("sets both link and items"),
            (false, false) => Some("sets neither link nor items"),
            _ => None,
        };
        if let Some(reason) = reason {
            problems.push(ValidationError::MalformedNavEntry {
                location: here.clone(),
                text: entry.text.clone(),
                reason,
            });
        }

        check_nav(&entry.children, &format!("{here}.items"), problems);
    }
}

fn check_sidebar(table: &SidebarTable, name: &str, problems: &mut Vec<ValidationError>) {
    check_prefixes(table.iter().map(|(prefix, _)| prefix), name, problems);

    for (prefix, value) in table.iter() {
        let SidebarValue::Entries(entries) = value else {
            continue;
        };
        let groups = entries.iter().filter(|entry| entry.is_group()).count();
        if groups != 0 && groups != entries.len() {
            problems.push(ValidationError::MixedSidebarMode {
                table: name.to_owned(),
                prefix: prefix.to_owned(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::locale::LocaleConfig;
    use crate::sidebar::SidebarEntry;

    fn kinds(config: &SiteConfig) -> Vec<ValidationErrorKind> {
        collect_problems(config)
            .iter()
            .map(ValidationError::kind)
            .collect()
    }

    fn flat(slugs: &[&str]) -> SidebarValue {
        SidebarValue::Entries(slugs.iter().map(|s| SidebarEntry::page(*s)).collect())
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(validate(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_duplicate_sidebar_prefix() {
        let config = SiteConfig {
            sidebar: SidebarTable::new()
                .with("/js/", flat(&["", "js01"]))
                .with("/js/", flat(&["js02"])),
            ..Default::default()
        };

        let err = validate(&config).unwrap_err();

        assert_eq!(err.kind(), ValidationErrorKind::DuplicatePrefix);
        assert_eq!(
            err,
            ValidationError::DuplicatePrefix {
                table: "sidebar".to_owned(),
                prefix: "/js/".to_owned(),
            }
        );
        assert!(err.to_string().contains("/js/"));
    }

    #[test]
    fn test_validate_overlapping_prefixes_are_not_duplicates() {
        let config = SiteConfig {
            sidebar: SidebarTable::new()
                .with("/", flat(&[""]))
                .with("/guide/", flat(&[""])),
            ..Default::default()
        };

        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_mixed_sidebar_mode() {
        let config = SiteConfig {
            sidebar: SidebarTable::new().with(
                "/webpack/",
                SidebarValue::Entries(vec![
                    SidebarEntry::page(""),
                    SidebarEntry::group("Webpack", false, ["install"]),
                ]),
            ),
            ..Default::default()
        };

        let err = validate(&config).unwrap_err();

        assert_eq!(err.kind(), ValidationErrorKind::MixedSidebarMode);
        assert!(err.to_string().contains("/webpack/"));
    }

    #[test]
    fn test_validate_all_groups_is_not_mixed() {
        let config = SiteConfig {
            sidebar: SidebarTable::new().with(
                "/webpack/",
                SidebarValue::Entries(vec![
                    SidebarEntry::group("Basics", false, ["", "install"]),
                    SidebarEntry::group("Advanced", true, ["loader"]),
                ]),
            ),
            ..Default::default()
        };

        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_missing_default_locale() {
        let config = SiteConfig {
            locales: vec![LocaleConfig::new("/en/", "en-US", "Blog", "")],
            ..Default::default()
        };

        let err = validate(&config).unwrap_err();

        assert_eq!(err, ValidationError::MissingDefaultLocale);
    }

    #[test]
    fn test_validate_duplicate_locale_prefix() {
        let config = SiteConfig {
            locales: vec![
                LocaleConfig::new("/", "zh-CN", "博客", ""),
                LocaleConfig::new("/", "en-US", "Blog", ""),
            ],
            ..Default::default()
        };

        assert_eq!(kinds(&config), vec![ValidationErrorKind::DuplicatePrefix]);
    }

    #[test]
    fn test_validate_nav_with_link_and_children() {
        let config = SiteConfig {
            nav: vec![NavEntry {
                text: "Guide".to_owned(),
                link: Some("/guide/".to_owned()),
                children: vec![NavEntry::link("Intro", "/guide/intro")],
            }],
            ..Default::default()
        };

        let err = validate(&config).unwrap_err();

        assert_eq!(
            err,
            ValidationError::MalformedNavEntry {
                location: "nav[0]".to_owned(),
                text: "Guide".to_owned(),
                reason: "sets both link and items",
            }
        );
    }

    #[test]
    fn test_validate_nested_nav_with_neither_link_nor_children() {
        let config = SiteConfig {
            nav: vec![
                NavEntry::link("Home", "/"),
                NavEntry::menu(
                    "Frontend",
                    vec![
                        NavEntry::link("HTML", "/frontEnd/html/"),
                        NavEntry::menu("Empty", Vec::new()),
                    ],
                ),
            ],
            ..Default::default()
        };

        let err = validate(&config).unwrap_err();

        assert_eq!(err.kind(), ValidationErrorKind::MalformedNavEntry);
        assert!(err.to_string().contains("nav[1].items[1]"));
        assert!(err.to_string().contains("Empty"));
    }

    #[test]
    fn test_validate_link_with_empty_children_is_leaf() {
        let config = SiteConfig {
            nav: vec![NavEntry {
                text: "Guide".to_owned(),
                link: Some("/guide/".to_owned()),
                children: Vec::new(),
            }],
            ..Default::default()
        };

        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_link_is_malformed() {
        let config = SiteConfig {
            nav: vec![
                NavEntry::link("Empty", ""),
                NavEntry::link("Guide", "/guide/"),
            ],
            ..Default::default()
        };

        assert_eq!(
            collect_problems(&config),
            vec![ValidationError::MalformedNavEntry {
                location: "nav[0]".to_owned(),
                text: "Empty".to_owned(),
                reason: "sets neither link nor items",
            }]
        );
    }

    #[test]
    fn test_validate_invalid_sidebar_prefix() {
        let config = SiteConfig {
            sidebar: SidebarTable::new().with("/guide", flat(&[""])),
            ..Default::default()
        };

        assert_eq!(kinds(&config), vec![ValidationErrorKind::InvalidPrefix]);
    }

    #[test]
    fn test_validate_override_for_unknown_locale() {
        let mut config = SiteConfig {
            locales: vec![LocaleConfig::new("/", "zh-CN", "博客", "")],
            ..Default::default()
        };
        config
            .locale_nav
            .insert("/en/".to_owned(), vec![NavEntry::link("Guide", "/en/guide/")]);

        let err = validate(&config).unwrap_err();

        assert_eq!(
            err,
            ValidationError::UnknownLocale {
                table: "nav".to_owned(),
                prefix: "/en/".to_owned(),
            }
        );
    }

    #[test]
    fn test_validate_checks_locale_overrides() {
        let mut config = SiteConfig {
            locales: vec![
                LocaleConfig::new("/", "zh-CN", "博客", ""),
                LocaleConfig::new("/en/", "en-US", "Blog", ""),
            ],
            ..Default::default()
        };
        config.locale_sidebar.insert(
            "/en/".to_owned(),
            SidebarTable::new()
                .with("/en/guide/", flat(&[""]))
                .with("/en/guide/", flat(&[""])),
        );

        let err = validate(&config).unwrap_err();

        assert_eq!(err.kind(), ValidationErrorKind::DuplicatePrefix);
        assert!(err.to_string().contains("locales.\"/en/\".sidebar"));
    }

    #[test]
    fn test_collect_problems_reports_everything_in_order() {
        let config = SiteConfig {
            locales: vec![LocaleConfig::new("/en/", "en-US", "Blog", "")],
            nav: vec![NavEntry::menu("Empty", Vec::new())],
            sidebar: SidebarTable::new()
                .with("/js/", flat(&[""]))
                .with("/js/", flat(&[""])),
            ..Default::default()
        };

        assert_eq!(
            kinds(&config),
            vec![
                ValidationErrorKind::MissingDefaultLocale,
                ValidationErrorKind::MalformedNavEntry,
                ValidationErrorKind::DuplicatePrefix,
            ]
        );
    }
}
