//! Error types for notification routing and delivery.

use thiserror::Error;

/// Reasons dispatch is skipped without contacting any backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationGap {
    /// No notifier was selected.
    #[error("no notifier selected")]
    NotifierDisabled,

    /// The selected notifier name is not a known backend.
    #[error("unsupported notifier `{name}`")]
    UnsupportedNotifier {
        /// Name as configured.
        name: String,
    },

    /// Slack was selected without a bot token.
    #[error("no Slack token provided")]
    MissingSlackToken,

    /// Slack was selected without a channel.
    #[error("no Slack channel provided")]
    MissingSlackChannel,

    /// Discord was selected without a webhook URL.
    #[error("no Discord webhook URL provided")]
    MissingDiscordWebhook,
}

/// Failures while delivering a batch to a backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The request could not be sent or timed out.
    #[error("request failed: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// Slack accepted the request but reported a logical failure.
    #[error("Slack API error: {error}")]
    Slack {
        /// Slack error code, e.g. `channel_not_found`.
        error: String,
    },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Rejected {
                status: status.as_u16(),
            },
            None => Self::Transport {
                message: error.to_string(),
            },
        }
    }
}
