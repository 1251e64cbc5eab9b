//! Behavioural tests for a full monitor invocation.

#[path = "monitor_bdd/mod.rs"]
mod monitor_bdd_support;

use herald::notify::{DiscordSettings, Mentions};
use herald::telemetry::TelemetryEvent;
use herald::{DispatchOutcome, MonitorOutcome, NotifierSelection};
use monitor_bdd_support::{
    MonitorState, PULLS_PATH, WEBHOOK_PATH, ensure_runtime_and_server, mount, parse_ages,
    pull_request_json, run_monitor,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[fixture]
fn monitor_state() -> MonitorState {
    MonitorState::default()
}

fn received(monitor_state: &MonitorState) -> Vec<Request> {
    let runtime = ensure_runtime_and_server(monitor_state);
    monitor_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .unwrap_or_else(|| panic!("mock server not initialised"))
        .unwrap_or_default()
}

fn webhook_posts(monitor_state: &MonitorState) -> Vec<Request> {
    received(monitor_state)
        .into_iter()
        .filter(|request| request.url.path() == WEBHOOK_PATH)
        .collect()
}

#[given("a repository whose first page lists pull requests opened {ages} hours ago")]
fn seed_paginated_listing(monitor_state: &MonitorState, ages: String) {
    let _runtime = ensure_runtime_and_server(monitor_state);
    let server_uri = monitor_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));

    let first_page: Vec<_> = parse_ages(&ages)
        .into_iter()
        .enumerate()
        .map(|(index, age)| {
            let number = index + 1;
            pull_request_json(number, &format!("contributor-{number}"), age)
        })
        .collect();
    let next_link =
        format!("<{server_uri}{PULLS_PATH}?state=open&per_page=100&page=2>; rel=\"next\"");

    mount(
        monitor_state,
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(&first_page)
                    .insert_header("Link", next_link.as_str()),
            ),
    );
    mount(
        monitor_state,
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([pull_request_json(99, "late", 1)])),
            ),
    );
}

#[given("a repository listing one pull request by {author} opened {age:i64} hours ago")]
fn seed_single_item(monitor_state: &MonitorState, author: String, age: i64) {
    mount(
        monitor_state,
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([pull_request_json(1, &author, age)])),
            ),
    );
}

#[given("a repository that rejects the token")]
fn seed_rejecting_repository(monitor_state: &MonitorState) {
    mount(
        monitor_state,
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            }))),
    );
}

#[given("a Discord webhook that accepts messages")]
fn seed_webhook(monitor_state: &MonitorState) {
    mount(
        monitor_state,
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(204)),
    );
    let server_uri = monitor_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));
    monitor_state
        .selection
        .set(NotifierSelection::Discord(DiscordSettings {
            webhook_url: Some(format!("{server_uri}{WEBHOOK_PATH}")),
            mentions: Mentions::default(),
        }));
}

#[given("Discord is selected without a webhook URL")]
fn select_discord_without_webhook(monitor_state: &MonitorState) {
    monitor_state
        .selection
        .set(NotifierSelection::Discord(DiscordSettings::default()));
}

#[when("the monitor runs with a {hours:u64} hour window")]
fn run_the_monitor(monitor_state: &MonitorState, hours: u64) {
    run_monitor(monitor_state, hours);
}

#[then("the webhook receives {count:usize} message")]
fn assert_webhook_messages(monitor_state: &MonitorState, count: usize) {
    assert_eq!(webhook_posts(monitor_state).len(), count, "webhook message count");
}

#[then("the Discord message announces {count:usize} new pull requests")]
fn assert_announcement(monitor_state: &MonitorState, count: usize) {
    let posts = webhook_posts(monitor_state);
    let post = posts
        .first()
        .unwrap_or_else(|| panic!("expected a webhook message"));
    let body: serde_json::Value = serde_json::from_slice(&post.body)
        .unwrap_or_else(|error| panic!("webhook body should be JSON: {error}"));

    assert_eq!(
        body["content"],
        format!("**{count} new pull requests in repo**")
    );
    assert_eq!(
        body["embeds"].as_array().map(Vec::len),
        Some(count),
        "one embed per pull request"
    );
    assert_eq!(
        monitor_state.outcome.get(),
        Some(MonitorOutcome::Dispatched(DispatchOutcome::Delivered {
            notifier: "discord",
            items: count
        }))
    );
}

#[then("page {page:u32} of the listing is never requested")]
fn assert_page_not_requested(monitor_state: &MonitorState, page: u32) {
    let page_value = page.to_string();
    let requested = received(monitor_state).into_iter().any(|request| {
        request.url.path() == PULLS_PATH
            && request
                .url
                .query_pairs()
                .any(|(key, value)| key == "page" && value == page_value.as_str())
    });

    assert!(!requested, "page {page} should not have been requested");
}

#[then("no notification is sent")]
fn assert_no_notification(monitor_state: &MonitorState) {
    assert!(webhook_posts(monitor_state).is_empty(), "no webhook expected");
    assert_eq!(monitor_state.outcome.get(), Some(MonitorOutcome::NoNewItems));
}

#[then("dispatch is skipped because {reason}")]
fn assert_dispatch_skipped(monitor_state: &MonitorState, reason: String) {
    let expected = reason.trim_matches('"');
    let events = monitor_state.events.get().unwrap_or_default();

    assert!(
        events.contains(&TelemetryEvent::DispatchSkipped {
            reason: expected.to_owned()
        }),
        "expected DispatchSkipped({expected}), got {events:?}"
    );
}

#[then("the scan is reported as failed")]
fn assert_scan_failed(monitor_state: &MonitorState) {
    let events = monitor_state.events.get().unwrap_or_default();

    assert!(
        events
            .iter()
            .any(|event| matches!(event, TelemetryEvent::ScanFailed { .. })),
        "expected ScanFailed, got {events:?}"
    );
}

#[scenario(path = "tests/features/monitor.feature", index = 0)]
fn announce_new_pull_requests(monitor_state: MonitorState) {
    let _ = monitor_state;
}

#[scenario(path = "tests/features/monitor.feature", index = 1)]
fn ignore_dependency_bot(monitor_state: MonitorState) {
    let _ = monitor_state;
}

#[scenario(path = "tests/features/monitor.feature", index = 2)]
fn skip_without_webhook(monitor_state: MonitorState) {
    let _ = monitor_state;
}

#[scenario(path = "tests/features/monitor.feature", index = 3)]
fn rejected_credentials(monitor_state: MonitorState) {
    let _ = monitor_state;
}
