//! "Edit this page" link composition.

use serde::Serialize;

/// Branch used when none is configured.
pub const DEFAULT_BRANCH: &str = "master";

/// Edit link settings. Present on a [`SiteConfig`](crate::SiteConfig) only
/// when edit links are enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditLinks {
    /// Repository base URL (e.g. `https://github.com/owner/name`).
    pub repo_url: String,
    /// Branch edits are made against.
    pub branch: String,
    /// Docs directory inside the repository, empty for the repository root.
    pub docs_dir: String,
    /// Link label for the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EditLinks {
    /// Edit links for `repo` on the default branch at the repository root.
    ///
    /// `repo` may be a full URL or a GitHub `owner/name` shorthand.
    #[must_use]
    pub fn new(repo: &str) -> Self {
        Self {
            repo_url: repo_url(repo),
            branch: DEFAULT_BRANCH.to_owned(),
            docs_dir: String::new(),
            text: None,
        }
    }

    /// Edit URL for the page at `path`.
    ///
    /// Composes `{repo_url}/edit/{branch}/{docs_dir}{path}` with exactly one
    /// `/` at each join.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let mut url = format!(
            "{}/edit/{}",
            self.repo_url.trim_end_matches('/'),
            self.branch.trim_matches('/')
        );
        let docs_dir = self.docs_dir.trim_matches('/');
        if !docs_dir.is_empty() {
            url.push('/');
            url.push_str(docs_dir);
        }
        url.push('/');
        url.push_str(path.trim_start_matches('/'));
        url
    }
}

/// Expand a GitHub `owner/name` shorthand into a repository URL.
///
/// Values that already carry an `http://` or `https://` scheme are returned
/// unchanged.
#[must_use]
pub fn repo_url(repo: &str) -> String {
    if repo.starts_with("http://") || repo.starts_with("https://") {
        repo.to_owned()
    } else {
        format!("https://github.com/{}", repo.trim_matches('/'))
    }
}
