//! `waypost resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use waypost_config::{CliSettings, Config};
use waypost_site::{NavEntry, PageContext, SidebarEntry, SidebarResolution};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Page path to resolve (e.g. `/frontEnd/js/js01.html`).
    path: String,

    /// Path to configuration file (default: auto-discover waypost.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the page context as JSON.
    #[arg(long)]
    json: bool,

    /// Enable edit links (overrides config).
    #[arg(long)]
    edit_links: Option<bool>,

    /// Disable edit links.
    #[arg(long, conflicts_with = "edit_links")]
    no_edit_links: bool,

    /// Branch used in edit links (overrides config).
    #[arg(long, env = "WAYPOST_BRANCH")]
    branch: Option<String>,

    /// Docs directory used in edit links (overrides config).
    #[arg(long)]
    docs_dir: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails to load or validate.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            edit_links_enabled: self.resolve_edit_links_enabled(),
            branch: self.branch,
            docs_dir: self.docs_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = config.build_site()?;
        let page = site.resolve(&self.path);

        tracing::info!(
            path = %self.path,
            locale = %page.locale.path_prefix,
            nav_depth = page.active_nav.len(),
            has_sidebar = !page.sidebar.is_none(),
            "Resolved page"
        );

        if self.json {
            output.data(&serde_json::to_string_pretty(&page)?)?;
        } else {
            print_page(&output, &page);
        }
        Ok(())
    }

    /// Resolve `edit_links_enabled` from --edit-links/--no-edit-links flags.
    fn resolve_edit_links_enabled(&self) -> Option<bool> {
        self.no_edit_links.then_some(false).or(self.edit_links)
    }
}

/// Human-readable page context.
fn print_page(output: &Output, page: &PageContext<'_>) {
    output.field("Path", &page.path);
    output.field(
        "Locale",
        &format!("{} ({})", page.locale.path_prefix, page.locale.lang),
    );

    if page.active_nav.is_empty() {
        output.field("Nav", "none");
    } else {
        output.field("Nav", &nav_trail(&page.active_nav));
    }

    match &page.sidebar {
        SidebarResolution::Explicit(entries) => {
            output.field("Sidebar", &format!("{} entries", entries.len()));
            for (depth, line) in sidebar_lines(entries) {
                output.item(depth, &line);
            }
        }
        SidebarResolution::Auto => {
            output.field("Sidebar", "auto");
            output.note(&format!("  headings to depth {}", page.sidebar_depth));
        }
        SidebarResolution::None => output.field("Sidebar", "none"),
    }

    if let Some(link) = &page.edit_link {
        let label = page.edit_link_text.unwrap_or("Edit");
        output.field(label, link);
    }
    if let Some(label) = page.last_updated {
        output.field("Last updated label", label);
    }
}

/// Nav chain as `Outer > Inner > Leaf`.
fn nav_trail(chain: &[&NavEntry]) -> String {
    chain
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Sidebar entries flattened to indented lines.
fn sidebar_lines(entries: &[SidebarEntry]) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    for entry in entries {
        match entry {
            SidebarEntry::Page(slug) => lines.push((0, slug.clone())),
            SidebarEntry::Group(group) => {
                let marker = if group.collapsible { "+" } else { "-" };
                lines.push((0, format!("{marker} {}", group.title)));
                lines.extend(group.children.iter().map(|slug| (1, slug.clone())));
            }
        }
    }
    lines
}
