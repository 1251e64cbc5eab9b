//! Shared data helpers for the monitor BDD tests.

use chrono::{TimeDelta, Utc};
use serde_json::json;
use wiremock::Mock;

use super::state::MonitorState;

pub(crate) const OWNER: &str = "octo";
pub(crate) const REPO: &str = "repo";
pub(crate) const PULLS_PATH: &str = "/api/v3/repos/octo/repo/pulls";
pub(crate) const WEBHOOK_PATH: &str = "/api/webhooks/1/token";

/// Parses a comma-separated list of ages in hours, e.g. `1,2,30`.
pub(crate) fn parse_ages(ages: &str) -> Vec<i64> {
    ages.split(',')
        .map(|age| {
            age.trim()
                .parse::<i64>()
                .unwrap_or_else(|error| panic!("invalid age `{age}`: {error}"))
        })
        .collect()
}

pub(crate) fn pull_request_json(number: usize, author: &str, age_hours: i64) -> serde_json::Value {
    let created_at = Utc::now() - TimeDelta::hours(age_hours);
    json!({
        "number": number,
        "title": format!("PR #{number}"),
        "state": "open",
        "html_url": format!("https://github.com/{OWNER}/{REPO}/pull/{number}"),
        "created_at": created_at.to_rfc3339(),
        "user": {
            "login": author,
            "avatar_url": format!("https://avatars.example/{author}")
        },
        "labels": [{ "name": "triage" }]
    })
}

/// Mounts `mock` on the scenario's server.
pub(crate) fn mount(monitor_state: &MonitorState, mock: Mock) {
    let runtime = super::ensure_runtime_and_server(monitor_state);
    monitor_state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));
}
