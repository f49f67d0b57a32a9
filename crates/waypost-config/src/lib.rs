//! Configuration loading for Waypost.
//!
//! Parses `waypost.toml` with serde, auto-discovers it in parent
//! directories, and converts the file schema into a
//! [`SiteConfig`](waypost_site::SiteConfig) for the resolution engine.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File Layout
//!
//! ```toml
//! [site]
//! title = "Blog"
//! plugins = ["@vuepress/back-to-top"]
//!
//! [edit_links]
//! enabled = true
//! repo = "owner/name"
//! docs_dir = "docs"
//!
//! [[nav]]
//! text = "Guide"
//! link = "/guide/"
//!
//! [[sidebar]]
//! prefix = "/guide/"
//! items = ["", "install", "start"]
//!
//! [locales."/"]
//! lang = "en-US"
//! title = "Blog"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `edit_links.repo`
//! - `edit_links.branch`
//! - `edit_links.docs_dir`

mod expand;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use waypost_site::{
    DEFAULT_BRANCH, DEFAULT_LANG, DEFAULT_SIDEBAR_DEPTH, EditLinks, LocaleConfig, NavEntry,
    SidebarEntry, SidebarTable, SidebarValue, Site, SiteConfig, ValidationError,
    collect_problems, repo_url,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override edit links enabled flag.
    pub edit_links_enabled: Option<bool>,
    /// Override edit link branch.
    pub branch: Option<String>,
    /// Override edit link docs directory.
    pub docs_dir: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "waypost.toml";

/// Sidebar keyword delegating to the heading index.
const AUTO_SIDEBAR: &str = "auto";

/// Deepest heading level an auto sidebar can show.
const MAX_SIDEBAR_DEPTH: u8 = 6;

/// Application configuration as parsed from `waypost.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteSection,
    /// Edit link settings.
    pub edit_links: EditLinksConfig,
    /// Default navigation tree.
    pub nav: Vec<NavEntry>,
    /// Default sidebar table, in declaration order.
    sidebar: Vec<SidebarRaw>,
    /// Locales keyed by path prefix.
    locales: BTreeMap<String, LocaleRaw>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Site language tag.
    pub lang: String,
    /// Heading depth shown in auto sidebars.
    pub sidebar_depth: u8,
    /// "Last updated" label.
    pub last_updated: Option<String>,
    /// Plugin identifiers, passed through untouched.
    pub plugins: Vec<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            lang: DEFAULT_LANG.to_owned(),
            sidebar_depth: DEFAULT_SIDEBAR_DEPTH,
            last_updated: None,
            plugins: Vec::new(),
        }
    }
}

/// `[edit_links]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditLinksConfig {
    /// Whether edit links are rendered.
    pub enabled: bool,
    /// Repository URL or GitHub `owner/name` shorthand.
    pub repo: Option<String>,
    /// Branch to edit (default: `master`).
    pub branch: Option<String>,
    /// Docs directory inside the repository.
    pub docs_dir: Option<String>,
    /// Link label.
    pub text: Option<String>,
}

/// One `[[sidebar]]` table.
#[derive(Debug, Deserialize)]
struct SidebarRaw {
    prefix: String,
    items: SidebarItemsRaw,
}

/// `items` is either an entry array or the `"auto"` keyword.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SidebarItemsRaw {
    Keyword(String),
    Entries(Vec<SidebarEntry>),
}

/// One `[locales."<prefix>"]` table.
#[derive(Debug, Deserialize)]
struct LocaleRaw {
    lang: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    nav: Option<Vec<NavEntry>>,
    sidebar: Option<Vec<SidebarRaw>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// File schema error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Navigation consistency error.
    #[error("Invalid navigation: {0}")]
    Invalid(#[from] ValidationError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`edit_links.repo`").
        field: String,
        /// Error message (e.g., "${`DOCS_REPO`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `waypost.toml` in current directory and parents,
    /// falling back to an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using empty configuration");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(enabled) = settings.edit_links_enabled {
            self.edit_links.enabled = enabled;
        }
        if let Some(branch) = &settings.branch {
            self.edit_links.branch = Some(branch.clone());
        }
        if let Some(docs_dir) = &settings.docs_dir {
            self.edit_links.docs_dir = Some(docs_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            nav_entries = config.nav.len(),
            sidebars = config.sidebar.len(),
            locales = config.locales.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Validate file-level settings.
    ///
    /// Navigation consistency is checked separately when the site is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_edit_links()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        if self.site.sidebar_depth > MAX_SIDEBAR_DEPTH {
            return Err(ConfigError::Validation(format!(
                "site.sidebar_depth cannot exceed {MAX_SIDEBAR_DEPTH}"
            )));
        }
        Ok(())
    }

    fn validate_edit_links(&self) -> Result<(), ConfigError> {
        // An incomplete section is fine while edit links are off
        if !self.edit_links.enabled {
            return Ok(());
        }
        let repo = self.edit_links.repo.as_deref().ok_or_else(|| {
            ConfigError::Validation("[edit_links] enabled requires repo to be set".to_owned())
        })?;
        require_non_empty(repo, "edit_links.repo")?;
        if let Some(branch) = &self.edit_links.branch {
            require_non_empty(branch, "edit_links.branch")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_env_opt(&mut self.edit_links.repo, "edit_links.repo")?;
        expand::expand_env_opt(&mut self.edit_links.branch, "edit_links.branch")?;
        expand::expand_env_opt(&mut self.edit_links.docs_dir, "edit_links.docs_dir")?;
        Ok(())
    }

    /// Convert the file schema into a [`SiteConfig`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for schema problems the TOML parser
    /// cannot catch (unknown sidebar keywords, edit links without a repo).
    pub fn site_config(&self) -> Result<SiteConfig, ConfigError> {
        self.validate()?;

        let mut locales = Vec::with_capacity(self.locales.len());
        let mut locale_nav = HashMap::new();
        let mut locale_sidebar = HashMap::new();
        for (prefix, raw) in &self.locales {
            locales.push(LocaleConfig::new(
                prefix.clone(),
                raw.lang.clone(),
                raw.title.clone(),
                raw.description.clone(),
            ));
            if let Some(nav) = &raw.nav {
                locale_nav.insert(prefix.clone(), nav.clone());
            }
            if let Some(sidebar) = &raw.sidebar {
                let field = format!("locales.{prefix:?}.sidebar");
                locale_sidebar.insert(prefix.clone(), sidebar_table(sidebar, &field)?);
            }
        }

        Ok(SiteConfig {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            lang: self.site.lang.clone(),
            nav: self.nav.clone(),
            sidebar: sidebar_table(&self.sidebar, "sidebar")?,
            locales,
            locale_nav,
            locale_sidebar,
            plugins: self.site.plugins.clone(),
            edit_links: self.edit_links(),
            sidebar_depth: self.site.sidebar_depth,
            last_updated: self.site.last_updated.clone(),
        })
    }

    /// Build the validated [`Site`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` with the first navigation problem, or
    /// any error from [`Config::site_config`].
    pub fn build_site(&self) -> Result<Site, ConfigError> {
        Ok(Site::new(self.site_config()?)?)
    }

    /// Every navigation problem in the configuration.
    ///
    /// # Errors
    ///
    /// Returns schema errors from [`Config::site_config`]; navigation
    /// problems are returned in the `Ok` value.
    pub fn problems(&self) -> Result<Vec<ValidationError>, ConfigError> {
        Ok(collect_problems(&self.site_config()?))
    }

    /// Resolved edit link settings, `None` when disabled.
    fn edit_links(&self) -> Option<EditLinks> {
        let section = &self.edit_links;
        if !section.enabled {
            return None;
        }
        let repo = section.repo.as_deref()?;
        Some(EditLinks {
            repo_url: repo_url(repo),
            branch: section
                .branch
                .clone()
                .unwrap_or_else(|| DEFAULT_BRANCH.to_owned()),
            docs_dir: section.docs_dir.clone().unwrap_or_default(),
            text: section.text.clone(),
        })
    }
}

/// Convert `[[sidebar]]` tables, keeping declaration order and duplicates.
fn sidebar_table(raw: &[SidebarRaw], field: &str) -> Result<SidebarTable, ConfigError> {
    raw.iter()
        .map(|sidebar| {
            let value = match &sidebar.items {
                SidebarItemsRaw::Entries(entries) => SidebarValue::Entries(entries.clone()),
                SidebarItemsRaw::Keyword(keyword) if keyword == AUTO_SIDEBAR => SidebarValue::Auto,
                SidebarItemsRaw::Keyword(keyword) => {
                    return Err(ConfigError::Validation(format!(
                        "{field} items for {:?} must be an array or \"{AUTO_SIDEBAR}\", got {keyword:?}",
                        sidebar.prefix
                    )));
                }
            };
            Ok((sidebar.prefix.clone(), value))
        })
        .collect()
}
