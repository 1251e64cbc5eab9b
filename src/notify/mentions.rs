//! Recipient mentions attached to notifications.

use std::str::FromStr;

/// How recipient identifiers should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    /// Individual user accounts.
    User,
    /// Slack user groups.
    Group,
    /// Discord roles.
    Role,
}

impl FromStr for MentionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "users" => Ok(Self::User),
            "group" | "groups" | "usergroup" | "subteam" => Ok(Self::Group),
            "role" | "roles" => Ok(Self::Role),
            other => Err(other.to_owned()),
        }
    }
}

/// Recipients to mention alongside a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mentions {
    kind: Option<MentionKind>,
    ids: Vec<String>,
}

impl Mentions {
    /// Builds mentions from an id type and a comma-separated id list.
    ///
    /// An unknown id type keeps the ids but renders no mentions.
    #[must_use]
    pub fn parse(id_type: Option<&str>, ids: Option<&str>) -> Self {
        let parsed_ids: Vec<String> = ids
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        let kind = match id_type.map(str::trim).filter(|value| !value.is_empty()) {
            None => Some(MentionKind::User),
            Some(raw) => match raw.parse::<MentionKind>() {
                Ok(kind) => Some(kind),
                Err(unknown) => {
                    if !parsed_ids.is_empty() {
                        tracing::warn!("unknown id type `{unknown}`; mentions will be omitted");
                    }
                    None
                }
            },
        };

        Self {
            kind,
            ids: parsed_ids,
        }
    }

    /// Builds mentions for explicit ids of one kind.
    #[must_use]
    pub const fn new(kind: MentionKind, ids: Vec<String>) -> Self {
        Self {
            kind: Some(kind),
            ids,
        }
    }

    /// Interpretation of the ids, if known.
    #[must_use]
    pub const fn kind(&self) -> Option<MentionKind> {
        self.kind
    }

    /// Recipient identifiers.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Renders every id with `format`, space separated.
    ///
    /// Returns `None` when there is nothing to mention or `format` rejects
    /// the kind.
    pub(crate) fn render(
        &self,
        format: impl Fn(MentionKind, &str) -> Option<String>,
    ) -> Option<String> {
        let kind = self.kind?;
        let rendered: Vec<String> = self
            .ids
            .iter()
            .map(|id| format(kind, id))
            .collect::<Option<_>>()?;
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.join(" "))
        }
    }
}
