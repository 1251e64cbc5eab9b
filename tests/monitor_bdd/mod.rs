//! Support modules for the monitor BDD tests.

pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use harness::{PULLS_PATH, WEBHOOK_PATH, mount, parse_ages, pull_request_json};
pub(crate) use state::{MonitorState, ensure_runtime_and_server, run_monitor};
