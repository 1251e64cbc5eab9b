//! Routing a batch of items to the selected notifier.

use super::discord::{DiscordNotifier, DiscordSettings};
use super::error::ConfigurationGap;
use super::Notifier;
use super::slack::{SlackNotifier, SlackSettings};
use crate::github::{ItemKind, NormalizedItem};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Backend chosen in configuration, with only that backend's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotifierSelection {
    /// No notifier configured.
    #[default]
    Disabled,
    /// Post to Slack.
    Slack(SlackSettings),
    /// Post to a Discord webhook.
    Discord(DiscordSettings),
    /// A notifier name Herald does not know.
    Unsupported(String),
}

/// Result of a dispatch attempt. None of these are errors to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The batch was empty, so nothing was attempted.
    NothingToSend,
    /// Dispatch was skipped because of configuration.
    Skipped(ConfigurationGap),
    /// The notifier accepted the whole batch.
    Delivered {
        /// Backend name.
        notifier: &'static str,
        /// Items delivered.
        items: usize,
    },
    /// The notifier failed; the failure was logged and not retried.
    Failed {
        /// Backend name.
        notifier: &'static str,
        /// Failure detail.
        message: String,
    },
}

/// Builds the notifier for `selection`.
///
/// # Errors
///
/// Returns a [`ConfigurationGap`] when no backend is selected, the name is
/// unknown, or the selected backend lacks a required credential.
pub fn resolve_notifier(
    selection: &NotifierSelection,
) -> Result<Box<dyn Notifier>, ConfigurationGap> {
    match selection {
        NotifierSelection::Disabled => Err(ConfigurationGap::NotifierDisabled),
        NotifierSelection::Unsupported(name) => Err(ConfigurationGap::UnsupportedNotifier {
            name: name.clone(),
        }),
        NotifierSelection::Slack(settings) => {
            let token = present(settings.token.as_deref())
                .ok_or(ConfigurationGap::MissingSlackToken)?;
            let channel = present(settings.channel.as_deref())
                .ok_or(ConfigurationGap::MissingSlackChannel)?;
            Ok(Box::new(SlackNotifier::new(
                token.to_owned(),
                channel.to_owned(),
                settings.mentions.clone(),
            )))
        }
        NotifierSelection::Discord(settings) => {
            let webhook_url = present(settings.webhook_url.as_deref())
                .ok_or(ConfigurationGap::MissingDiscordWebhook)?;
            Ok(Box::new(DiscordNotifier::new(
                webhook_url.to_owned(),
                settings.mentions.clone(),
            )))
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|candidate| !candidate.is_empty())
}

/// Sends `items` through the notifier selected in `selection`.
///
/// Configuration gaps are a logged no-op. Delivery failures are logged and
/// recorded but never returned as errors.
pub async fn dispatch(
    selection: &NotifierSelection,
    items: &[NormalizedItem],
    repository: &str,
    kind: ItemKind,
    telemetry: &dyn TelemetrySink,
) -> DispatchOutcome {
    if items.is_empty() {
        return DispatchOutcome::NothingToSend;
    }

    match resolve_notifier(selection) {
        Ok(notifier) => deliver(notifier.as_ref(), items, repository, kind, telemetry).await,
        Err(gap) => {
            tracing::info!("{gap}; skipping notification");
            telemetry.record(TelemetryEvent::DispatchSkipped {
                reason: gap.to_string(),
            });
            DispatchOutcome::Skipped(gap)
        }
    }
}

/// Hands the whole batch to `notifier` exactly once.
pub async fn deliver(
    notifier: &dyn Notifier,
    items: &[NormalizedItem],
    repository: &str,
    kind: ItemKind,
    telemetry: &dyn TelemetrySink,
) -> DispatchOutcome {
    let name = notifier.name();
    tracing::info!(
        notifier = name,
        "sending notifications for {}s: {:?}",
        kind.noun(),
        items.iter().map(|item| item.title.as_str()).collect::<Vec<_>>()
    );

    match notifier.notify(items, repository, kind).await {
        Ok(()) => {
            telemetry.record(TelemetryEvent::NotificationDelivered {
                notifier: name.to_owned(),
                items: items.len(),
            });
            DispatchOutcome::Delivered {
                notifier: name,
                items: items.len(),
            }
        }
        Err(error) => {
            tracing::warn!(notifier = name, "notification failed: {error}");
            telemetry.record(TelemetryEvent::NotificationFailed {
                notifier: name.to_owned(),
                message: error.to_string(),
            });
            DispatchOutcome::Failed {
                notifier: name,
                message: error.to_string(),
            }
        }
    }
}
