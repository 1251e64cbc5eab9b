//! Monitor configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.herald.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `HERALD_*`, plus the legacy `GITHUB_TOKEN`
//!    fallback for the token
//! 4. **Command-line arguments** – `--owner`/`-o`, `--notifier`/`-n`, ...
//!
//! # Configuration File
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! kind = "pr"
//! notifier = "slack"
//! slack_token = "xoxb-example"
//! slack_channel = "C0123456"
//! slack_id_type = "group"
//! slack_ids = "S0123,S0456"
//! alert_window_hours = 24
//! ```
//!
//! Only the fields of the selected notifier are read; Discord settings are
//! ignored while `notifier = "slack"` and vice versa.

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::{IntakeError, ItemKind, TimeWindow};
use crate::notify::{DiscordSettings, Mentions, NotifierSelection, SlackSettings};

/// Alert window applied when none is configured.
pub const DEFAULT_ALERT_WINDOW_HOURS: u64 = 24;

/// Monitor configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use herald::HeraldConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = HeraldConfig::load().expect("failed to load configuration");
/// let (owner, repo) = config.require_repository_info().expect("owner and repo required");
/// let selection = config.notifier_selection();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "HERALD",
    discovery(
        dotfile_name = ".herald.toml",
        config_file_name = "herald.toml",
        app_name = "herald"
    )
)]
pub struct HeraldConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `HERALD_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository owner (e.g., "octocat").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Web URL of the GitHub host. Enterprise hosts get `/api/v3`.
    #[ortho_config(cli_short = 'g')]
    pub github_url: Option<String>,

    /// Item kind to watch: `pr` (default) or `issue`.
    #[ortho_config(cli_short = 'k')]
    pub kind: Option<String>,

    /// Notifier backend: `slack` or `discord`. Unset disables delivery.
    #[ortho_config(cli_short = 'n')]
    pub notifier: Option<String>,

    /// Slack bot token.
    #[ortho_config(cli_short = 's')]
    pub slack_token: Option<String>,

    /// Slack channel id.
    #[ortho_config(cli_short = 'c')]
    pub slack_channel: Option<String>,

    /// Slack id type: `user` or `group`.
    #[ortho_config(cli_short = 'i')]
    pub slack_id_type: Option<String>,

    /// Comma-separated Slack ids to mention.
    #[ortho_config(cli_short = 'm')]
    pub slack_ids: Option<String>,

    /// Discord incoming webhook URL.
    #[ortho_config(cli_short = 'd')]
    pub discord_webhook_url: Option<String>,

    /// Discord id type: `user` or `role`.
    #[ortho_config(cli_short = 'D')]
    pub discord_id_type: Option<String>,

    /// Comma-separated Discord ids to mention.
    #[ortho_config(cli_short = 'M')]
    pub discord_ids: Option<String>,

    /// Hours before now that an item may have been created and still be
    /// reported.
    ///
    /// Defaults to 24 hours.
    #[ortho_config(cli_short = 'w')]
    pub alert_window_hours: u64,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            github_url: None,
            kind: None,
            notifier: None,
            slack_token: None,
            slack_channel: None,
            slack_id_type: None,
            slack_ids: None,
            discord_webhook_url: None,
            discord_id_type: None,
            discord_ids: None,
            alert_window_hours: DEFAULT_ALERT_WINDOW_HOURS,
        }
    }
}

impl HeraldConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, IntakeError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(IntakeError::MissingToken)
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when owner or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), IntakeError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(IntakeError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(IntakeError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Parses the configured item kind, defaulting to pull requests.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for an unrecognised kind.
    pub fn item_kind(&self) -> Result<ItemKind, IntakeError> {
        self.kind
            .as_deref()
            .map_or(Ok(ItemKind::default()), str::parse::<ItemKind>)
    }

    /// Window ending now and spanning `alert_window_hours`.
    #[must_use]
    pub fn alert_window(&self) -> TimeWindow {
        TimeWindow::trailing_hours(self.alert_window_hours)
    }

    /// Builds the notifier selection, reading only the chosen backend's
    /// fields.
    #[must_use]
    pub fn notifier_selection(&self) -> NotifierSelection {
        let Some(name) = self
            .notifier
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return NotifierSelection::Disabled;
        };

        match name.to_ascii_lowercase().as_str() {
            "slack" => NotifierSelection::Slack(SlackSettings {
                token: self.slack_token.clone(),
                channel: self.slack_channel.clone(),
                mentions: Mentions::parse(
                    self.slack_id_type.as_deref(),
                    self.slack_ids.as_deref(),
                ),
            }),
            "discord" => NotifierSelection::Discord(DiscordSettings {
                webhook_url: self.discord_webhook_url.clone(),
                mentions: Mentions::parse(
                    self.discord_id_type.as_deref(),
                    self.discord_ids.as_deref(),
                ),
            }),
            _ => NotifierSelection::Unsupported(name.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests;
