//! Data models for items listed from GitHub.
//!
//! `RawItem` mirrors the upstream JSON shape for both the pulls and issues
//! listings and ignores every field Herald does not use. `NormalizedItem` is
//! the backend-agnostic record handed to notifiers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::IntakeError;

/// Login GitHub reports for content whose author account was deleted.
pub const GHOST_LOGIN: &str = "ghost";

/// Kind of repository item being monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    /// Open pull requests, listed from `/pulls`.
    #[default]
    PullRequest,
    /// Open issues, listed from `/issues`.
    Issue,
}

impl ItemKind {
    /// Collection segment of the REST listing endpoint.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::PullRequest => "pulls",
            Self::Issue => "issues",
        }
    }

    /// Human-readable noun used in notifications.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::PullRequest => "pull request",
            Self::Issue => "issue",
        }
    }

    /// Returns true when a listed item belongs to this kind.
    ///
    /// The issues endpoint also returns pull requests, marked by a
    /// `pull_request` object, so those are rejected for [`ItemKind::Issue`].
    #[must_use]
    pub const fn accepts(self, item: &RawItem) -> bool {
        match self {
            Self::PullRequest => true,
            Self::Issue => !item.is_pull_request(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.noun())
    }
}

impl FromStr for ItemKind {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pr" | "prs" | "pull" | "pulls" | "pull_request" | "pull-request" => {
                Ok(Self::PullRequest)
            }
            "issue" | "issues" => Ok(Self::Issue),
            other => Err(IntakeError::Configuration {
                message: format!("unknown item kind `{other}` (expected `pr` or `issue`)"),
            }),
        }
    }
}

/// Item as returned by the GitHub listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author account, absent for deleted users.
    #[serde(default)]
    pub user: Option<RawUser>,
    /// Item title.
    #[serde(default)]
    pub title: String,
    /// Browser URL of the item.
    #[serde(default)]
    pub html_url: String,
    /// Labels in the order GitHub returns them.
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    /// Present on entries of the issues listing that are pull requests.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// Author account attached to a listed item.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    /// Account handle.
    pub login: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Label attached to a listed item.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    /// Label name.
    pub name: String,
}

impl RawItem {
    /// Author handle, falling back to GitHub's `ghost` account.
    #[must_use]
    pub fn author_login(&self) -> &str {
        self.user
            .as_ref()
            .map_or(GHOST_LOGIN, |user| user.login.as_str())
    }

    /// Whether this entry of an issues listing is actually a pull request.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Backend-agnostic record produced by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedItem {
    /// Handle of the creator.
    pub author: String,
    /// Avatar image URL of the creator; empty when GitHub provides none.
    pub avatar_url: String,
    /// Item title.
    pub title: String,
    /// Canonical browser link.
    pub url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Label names, upstream order and duplicates preserved.
    pub labels: Vec<String>,
}

impl From<RawItem> for NormalizedItem {
    fn from(value: RawItem) -> Self {
        let (author, avatar_url) = match value.user {
            Some(user) => (user.login, user.avatar_url.unwrap_or_default()),
            None => (GHOST_LOGIN.to_owned(), String::new()),
        };
        Self {
            author,
            avatar_url,
            title: value.title,
            url: value.html_url,
            created_at: value.created_at,
            labels: value.labels.into_iter().map(|label| label.name).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::{GHOST_LOGIN, ItemKind, NormalizedItem, RawItem};

    #[test]
    fn raw_item_ignores_unknown_fields_and_normalizes() {
        let value = json!({
            "number": 17,
            "state": "open",
            "title": "Add retry budget",
            "html_url": "https://github.com/octo/repo/pull/17",
            "created_at": "2025-03-04T05:06:07Z",
            "draft": false,
            "user": {
                "login": "octocat",
                "avatar_url": "https://avatars.githubusercontent.com/u/1",
                "type": "User"
            },
            "labels": [
                { "id": 1, "name": "bug" },
                { "id": 2, "name": "needs-review" },
                { "id": 1, "name": "bug" }
            ]
        });

        let raw: RawItem = serde_json::from_value(value).expect("RawItem should deserialise");
        let item = NormalizedItem::from(raw);

        assert_eq!(item.author, "octocat");
        assert_eq!(item.avatar_url, "https://avatars.githubusercontent.com/u/1");
        assert_eq!(item.title, "Add retry budget");
        assert_eq!(item.url, "https://github.com/octo/repo/pull/17");
        assert_eq!(
            item.created_at,
            chrono::Utc
                .with_ymd_and_hms(2025, 3, 4, 5, 6, 7)
                .single()
                .expect("valid timestamp")
        );
        assert_eq!(item.labels, vec!["bug", "needs-review", "bug"]);
    }

    #[test]
    fn missing_user_normalizes_to_ghost() {
        let raw: RawItem = serde_json::from_value(json!({
            "title": "Orphaned",
            "html_url": "https://github.com/octo/repo/issues/3",
            "created_at": "2025-03-04T05:06:07Z",
            "user": null
        }))
        .expect("RawItem should deserialise");

        assert_eq!(raw.author_login(), GHOST_LOGIN);
        let item = NormalizedItem::from(raw);
        assert_eq!(item.author, GHOST_LOGIN);
        assert!(item.avatar_url.is_empty());
        assert!(item.labels.is_empty());
    }

    #[test]
    fn issue_kind_rejects_pull_request_entries() {
        let raw: RawItem = serde_json::from_value(json!({
            "title": "Actually a PR",
            "html_url": "https://github.com/octo/repo/pull/9",
            "created_at": "2025-03-04T05:06:07Z",
            "pull_request": { "url": "https://api.github.com/repos/octo/repo/pulls/9" }
        }))
        .expect("RawItem should deserialise");

        assert!(raw.is_pull_request());
        assert!(!ItemKind::Issue.accepts(&raw));
        assert!(ItemKind::PullRequest.accepts(&raw));
    }

    #[rstest]
    #[case::short("pr", ItemKind::PullRequest)]
    #[case::collection("pulls", ItemKind::PullRequest)]
    #[case::mixed_case(" Issue ", ItemKind::Issue)]
    #[case::plural("issues", ItemKind::Issue)]
    fn item_kind_parses_known_names(#[case] input: &str, #[case] expected: ItemKind) {
        assert_eq!(input.parse::<ItemKind>().ok(), Some(expected));
    }

    #[test]
    fn item_kind_rejects_unknown_names() {
        let result = "discussion".parse::<ItemKind>();
        assert!(result.is_err(), "expected error, got {result:?}");
    }
}
