//! Slack delivery through the `chat.postMessage` Web API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::error::DeliveryError;
use super::mentions::{MentionKind, Mentions};
use super::render::{format_created_at, label_list};
use super::{DEFAULT_TIMEOUT, Notifier};
use crate::github::{ItemKind, NormalizedItem};

/// Public Slack Web API host.
pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com";

/// Slack options read from configuration when Slack is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlackSettings {
    /// Bot token (`xoxb-…`).
    pub token: Option<String>,
    /// Channel id or name to post to.
    pub channel: Option<String>,
    /// Users or user groups to mention.
    pub mentions: Mentions,
}

#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts one Slack message per item, authenticated with a bot token.
///
/// Only the first message of a batch mentions the configured recipients.
#[derive(Clone)]
pub struct SlackNotifier {
    token: String,
    channel: String,
    mentions: Mentions,
    api_base: String,
    client: Client,
}

impl SlackNotifier {
    /// Creates a notifier posting to `channel` with `token`.
    #[must_use]
    pub fn new(token: String, channel: String, mentions: Mentions) -> Self {
        Self {
            token,
            channel,
            mentions,
            api_base: DEFAULT_SLACK_API_BASE.to_owned(),
            client: Client::new(),
        }
    }

    /// Overrides the Slack API host, e.g. for a mock server.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    fn mention_line(&self) -> Option<String> {
        self.mentions.render(|kind, id| match kind {
            MentionKind::User => Some(format!("<@{id}>")),
            MentionKind::Group => Some(format!("<!subteam^{id}>")),
            MentionKind::Role => None,
        })
    }

    /// Builds the `chat.postMessage` body for one item, prefixed with
    /// `mentions` when given.
    pub(crate) fn message_payload(
        &self,
        item: &NormalizedItem,
        repository: &str,
        kind: ItemKind,
        mentions: Option<&str>,
    ) -> Value {
        let noun = kind.noun();
        let title = escape_mrkdwn(&item.title);
        let repository = escape_mrkdwn(repository);
        let mut headline = format!("*New {noun} in {repository}*\n<{}|{title}>", item.url);
        if let Some(mentions) = mentions {
            headline = format!("{mentions}\n{headline}");
        }

        let mut section = json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": headline }
        });
        if !item.avatar_url.is_empty()
            && let Some(fields) = section.as_object_mut()
        {
            fields.insert(
                "accessory".to_owned(),
                json!({
                    "type": "image",
                    "image_url": item.avatar_url,
                    "alt_text": item.author
                }),
            );
        }

        let mut context = vec![json!({
            "type": "mrkdwn",
            "text": format!(
                "Opened by *{}* on {}",
                escape_mrkdwn(&item.author),
                format_created_at(item.created_at)
            )
        })];
        let rendered_labels =
            label_list(&item.labels, |label| format!("`{}`", escape_mrkdwn(label)));
        if let Some(labels) = rendered_labels {
            context.push(json!({ "type": "mrkdwn", "text": format!("Labels: {labels}") }));
        }

        json!({
            "channel": self.channel,
            "text": format!("New {noun} in {repository}: {title}"),
            "unfurl_links": false,
            "blocks": [
                section,
                { "type": "context", "elements": context }
            ]
        })
    }

    async fn post_message(&self, payload: &Value) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(format!("{}/api/chat.postMessage", self.api_base))
            .bearer_auth(&self.token)
            .timeout(DEFAULT_TIMEOUT)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let body: SlackApiResponse = response.json().await?;
        if body.ok {
            Ok(())
        } else {
            Err(DeliveryError::Slack {
                error: body.error.unwrap_or_else(|| "unknown_error".to_owned()),
            })
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn notify(
        &self,
        items: &[NormalizedItem],
        repository: &str,
        kind: ItemKind,
    ) -> Result<(), DeliveryError> {
        let mut mentions = self.mention_line();
        let mut first_failure = None;
        for item in items {
            let prefix = mentions.take();
            let payload = self.message_payload(item, repository, kind, prefix.as_deref());
            if let Err(error) = self.post_message(&payload).await {
                tracing::warn!(url = %item.url, "Slack notification failed: {error}");
                first_failure.get_or_insert(error);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }
}

/// Escapes the three characters Slack treats as control sequences.
fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
