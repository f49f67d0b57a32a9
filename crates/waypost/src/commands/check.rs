//! `waypost check` command implementation.

use std::path::PathBuf;

use clap::Args;
use waypost_config::Config;
use waypost_site::ValidationError;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover waypost.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or has
    /// navigation problems.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        match &config.config_path {
            Some(path) => output.info(&format!("Checking {}", path.display())),
            None => output.warning("No waypost.toml found, checking empty configuration"),
        }

        let problems = config.problems()?;
        if !problems.is_empty() {
            for problem in &problems {
                output.error(&format!("  {problem}"));
            }
            return Err(CliError::Validation(problem_summary(&problems)));
        }

        let site = config.build_site()?;
        let site_config = site.config();
        output.success(&format!(
            "Configuration OK: {} nav entries, {} sidebars, {} locales, {} plugins",
            site_config.nav.len(),
            site_config.sidebar.len(),
            site_config.locales.len(),
            site.plugins().len(),
        ));
        Ok(())
    }
}

/// One-line summary of the problems found.
fn problem_summary(problems: &[ValidationError]) -> String {
    match problems.len() {
        1 => "1 configuration problem found".to_owned(),
        n => format!("{n} configuration problems found"),
    }
}
