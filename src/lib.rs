//! Herald watches a GitHub repository for newly opened pull requests or
//! issues and announces them in Slack or Discord.
//!
//! A run walks the open-item listing newest first, keeps items created inside
//! the alert window (skipping `dependabot[bot]`), and hands the batch to the
//! configured notifier. Failures are logged and reported through a
//! [`telemetry::TelemetrySink`]; a run never aborts half way.

pub mod config;
pub mod github;
pub mod monitor;
pub mod notify;
pub mod telemetry;

pub use config::HeraldConfig;
pub use github::{
    IntakeError, ItemFetcher, ItemKind, NormalizedItem, OctocrabItemGateway, PersonalAccessToken,
    RepositoryLocator, TimeWindow,
};
pub use monitor::{MonitorOutcome, MonitorRequest, monitor, monitor_with_gateway};
pub use notify::{DispatchOutcome, Notifier, NotifierSelection, dispatch};
