//! One monitor invocation: fetch new items, then dispatch them.
//!
//! The pipeline is strictly sequential. The fetcher runs to completion (or
//! degrades to an empty result), and only a non-empty result reaches the
//! dispatcher. Nothing in here returns an error; every failure is logged and
//! reported to the telemetry sink.

use crate::HeraldConfig;
use crate::github::locator::DEFAULT_GITHUB_URL;
use crate::github::{
    IntakeError, ItemFetcher, ItemGateway, ItemKind, OctocrabItemGateway, PersonalAccessToken,
    RepositoryLocator, TimeWindow,
};
use crate::notify::{DispatchOutcome, NotifierSelection, dispatch};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Everything one invocation needs, validated up front.
#[derive(Debug, Clone)]
pub struct MonitorRequest {
    /// GitHub credential.
    pub token: PersonalAccessToken,
    /// Repository to watch.
    pub locator: RepositoryLocator,
    /// Pull requests or issues.
    pub kind: ItemKind,
    /// Alert window, fixed for the whole invocation.
    pub window: TimeWindow,
    /// Where to send new items.
    pub notifier: NotifierSelection,
}

impl MonitorRequest {
    /// Builds a request from loaded configuration.
    ///
    /// The alert window is computed here, once.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] without a token,
    /// [`IntakeError::Configuration`] without owner and repo or for an
    /// unknown item kind, and [`IntakeError::InvalidUrl`] for a malformed
    /// `github_url`.
    pub fn from_config(config: &HeraldConfig) -> Result<Self, IntakeError> {
        let token = PersonalAccessToken::new(config.resolve_token()?)?;
        let (owner, repo) = config.require_repository_info()?;
        let github_url = config.github_url.as_deref().unwrap_or(DEFAULT_GITHUB_URL);
        let locator = RepositoryLocator::on_host(github_url, owner, repo)?;

        Ok(Self {
            token,
            locator,
            kind: config.item_kind()?,
            window: config.alert_window(),
            notifier: config.notifier_selection(),
        })
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The fetch produced nothing, so no notifier was consulted.
    NoNewItems,
    /// New items were handed to the dispatcher.
    Dispatched(DispatchOutcome),
}

/// Runs one invocation against GitHub through Octocrab.
pub async fn monitor(request: &MonitorRequest, telemetry: &dyn TelemetrySink) -> MonitorOutcome {
    match OctocrabItemGateway::for_token(&request.token, &request.locator) {
        Ok(gateway) => monitor_with_gateway(&gateway, request, telemetry).await,
        Err(error) => {
            tracing::warn!("could not build GitHub client: {error}");
            telemetry.record(TelemetryEvent::ScanFailed {
                message: error.to_string(),
            });
            MonitorOutcome::NoNewItems
        }
    }
}

/// Runs one invocation against an arbitrary gateway.
pub async fn monitor_with_gateway<Gateway>(
    gateway: &Gateway,
    request: &MonitorRequest,
    telemetry: &dyn TelemetrySink,
) -> MonitorOutcome
where
    Gateway: ItemGateway,
{
    let items = ItemFetcher::new(gateway, telemetry)
        .fetch(&request.locator, request.kind, &request.window)
        .await;

    if items.is_empty() {
        tracing::info!("no new {}s", request.kind.noun());
        return MonitorOutcome::NoNewItems;
    }

    let outcome = dispatch(
        &request.notifier,
        &items,
        request.locator.repository().as_str(),
        request.kind,
        telemetry,
    )
    .await;
    MonitorOutcome::Dispatched(outcome)
}
