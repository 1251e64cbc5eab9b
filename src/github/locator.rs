//! Repository coordinates and identity wrappers for GitHub intake.

use url::Url;

use super::error::IntakeError;
use super::models::ItemKind;

/// Host used when no GitHub Enterprise URL is configured.
pub const DEFAULT_GITHUB_URL: &str = "https://github.com";

const PUBLIC_API_URL: &str = "https://api.github.com";

fn non_blank(value: &str) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingPathSegments);
    }
    Ok(trimmed.to_owned())
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, IntakeError> {
        non_blank(value).map(Self)
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, IntakeError> {
        non_blank(value).map(Self)
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, IntakeError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntakeError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Maps the web URL of a GitHub instance to its REST API root.
///
/// `github.com` is served from `api.github.com`. Every other host is
/// treated as GitHub Enterprise, whose API lives under `/api/v3` on the same
/// scheme, host and port.
fn api_root(github_url: &str) -> Result<Url, IntakeError> {
    let invalid = |error: url::ParseError| IntakeError::InvalidUrl(error.to_string());
    let web = Url::parse(github_url.trim_end_matches('/')).map_err(invalid)?;
    let host = web
        .host_str()
        .ok_or_else(|| IntakeError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse(PUBLIC_API_URL).map_err(invalid);
    }

    let mut api = web;
    api.set_path("api/v3");
    api.set_query(None);
    api.set_fragment(None);
    Ok(api)
}

/// Parsed repository coordinates with the derived API base.
///
/// # Example
///
/// ```
/// use herald::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::on_host("https://ghe.example.com", "octo", "repo")
///     .expect("should build locator");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api/v3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, IntakeError> {
        Self::on_host(DEFAULT_GITHUB_URL, owner, repo)
    }

    /// Creates a repository locator for a repository hosted at `github_url`.
    ///
    /// `github_url` is the web URL of the GitHub instance, for example
    /// `https://github.com` or `https://ghe.example.com`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingPathSegments` when owner or repo is blank
    /// and `IntakeError::InvalidUrl` when `github_url` cannot be parsed.
    pub fn on_host(github_url: &str, owner: &str, repo: &str) -> Result<Self, IntakeError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
            api_base: api_root(github_url)?,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path listing items of the given kind.
    pub(crate) fn items_path(&self, kind: ItemKind) -> String {
        format!(
            "/repos/{}/{}/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            kind.collection()
        )
    }
}
