//! Formatting shared by the notification backends.

use chrono::{DateTime, Utc};

use crate::github::ItemKind;

/// Renders a creation time as `YYYY-MM-DD HH:MM UTC`.
#[must_use]
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Summary line such as `2 new pull requests in herald`.
#[must_use]
pub fn headline(count: usize, kind: ItemKind, repository: &str) -> String {
    let noun = kind.noun();
    if count == 1 {
        format!("New {noun} in {repository}")
    } else {
        format!("{count} new {noun}s in {repository}")
    }
}

/// Joins labels with `wrap` applied to each, or `None` when there are none.
#[must_use]
pub fn label_list(labels: &[String], wrap: impl Fn(&str) -> String) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    Some(
        labels
            .iter()
            .map(|label| wrap(label))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Truncates `text` to at most `limit` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(limit.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
