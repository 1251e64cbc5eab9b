//! Discord delivery through an incoming webhook.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::error::DeliveryError;
use super::mentions::{MentionKind, Mentions};
use super::render::{format_created_at, headline, label_list, truncate};
use super::{DEFAULT_TIMEOUT, Notifier};
use crate::github::{ItemKind, NormalizedItem};

/// Discord rejects webhook messages carrying more embeds than this.
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;

const CONTENT_LIMIT: usize = 2000;
const EMBED_TITLE_LIMIT: usize = 256;
const EMBED_FIELD_LIMIT: usize = 1024;
const EMBED_COLOUR: u32 = 0x002E_A043;

/// Discord options read from configuration when Discord is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscordSettings {
    /// Incoming webhook URL.
    pub webhook_url: Option<String>,
    /// Users or roles to mention.
    pub mentions: Mentions,
}

/// Posts batches of embeds to a Discord webhook. No separate authentication.
#[derive(Clone)]
pub struct DiscordNotifier {
    webhook_url: String,
    mentions: Mentions,
    client: Client,
}

impl DiscordNotifier {
    /// Creates a notifier posting to `webhook_url`.
    #[must_use]
    pub fn new(webhook_url: String, mentions: Mentions) -> Self {
        Self {
            webhook_url,
            mentions,
            client: Client::new(),
        }
    }

    fn mention_line(&self) -> Option<String> {
        self.mentions.render(|kind, id| match kind {
            MentionKind::User => Some(format!("<@{id}>")),
            MentionKind::Role => Some(format!("<@&{id}>")),
            MentionKind::Group => None,
        })
    }

    /// Splits the batch into webhook messages of at most
    /// [`MAX_EMBEDS_PER_MESSAGE`] embeds. Only the first carries text.
    pub(crate) fn payloads(
        &self,
        items: &[NormalizedItem],
        repository: &str,
        kind: ItemKind,
    ) -> Vec<DiscordWebhookPayload> {
        let summary = format!("**{}**", headline(items.len(), kind, repository));
        let mut content = Some(match self.mention_line() {
            Some(mentions) => truncate(&format!("{mentions} {summary}"), CONTENT_LIMIT),
            None => summary,
        });

        items
            .chunks(MAX_EMBEDS_PER_MESSAGE)
            .map(|chunk| DiscordWebhookPayload {
                content: content.take(),
                embeds: chunk
                    .iter()
                    .map(|item| DiscordEmbed::for_item(item, repository))
                    .collect(),
            })
            .collect()
    }

    async fn post(&self, payload: &DiscordWebhookPayload) -> Result<(), DeliveryError> {
        self.client
            .post(&self.webhook_url)
            .timeout(DEFAULT_TIMEOUT)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn notify(
        &self,
        items: &[NormalizedItem],
        repository: &str,
        kind: ItemKind,
    ) -> Result<(), DeliveryError> {
        let mut first_failure = None;
        for payload in self.payloads(items, repository, kind) {
            if let Err(error) = self.post(&payload).await {
                tracing::warn!(
                    embeds = payload.embeds.len(),
                    "Discord notification failed: {error}"
                );
                first_failure.get_or_insert(error);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DiscordWebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) content: Option<String>,
    pub(crate) embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiscordEmbed {
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) description: String,
    pub(crate) color: u32,
    pub(crate) timestamp: String,
    pub(crate) author: DiscordEmbedAuthor,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) fields: Vec<DiscordEmbedField>,
    pub(crate) footer: DiscordEmbedFooter,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiscordEmbedAuthor {
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) icon_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiscordEmbedField {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) inline: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiscordEmbedFooter {
    pub(crate) text: String,
}

impl DiscordEmbed {
    fn for_item(item: &NormalizedItem, repository: &str) -> Self {
        let fields = label_list(&item.labels, |label| format!("`{label}`"))
            .map(|labels| DiscordEmbedField {
                name: "Labels".to_owned(),
                value: truncate(&labels, EMBED_FIELD_LIMIT),
                inline: false,
            })
            .into_iter()
            .collect();

        Self {
            title: truncate(&item.title, EMBED_TITLE_LIMIT),
            url: item.url.clone(),
            description: format!(
                "Opened by **{}** on {}",
                item.author,
                format_created_at(item.created_at)
            ),
            color: EMBED_COLOUR,
            timestamp: item.created_at.to_rfc3339(),
            author: DiscordEmbedAuthor {
                name: item.author.clone(),
                icon_url: Some(item.avatar_url.clone()).filter(|url| !url.is_empty()),
            },
            fields,
            footer: DiscordEmbedFooter {
                text: repository.to_owned(),
            },
        }
    }
}
