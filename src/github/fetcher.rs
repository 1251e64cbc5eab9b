//! Incremental discovery of recently created items.
//!
//! `ItemFetcher` walks the open-item listing page by page, keeps the items
//! created inside the alert window, and stops as soon as a page shows an item
//! older than the cutoff.
//!
//! # Ordering precondition
//!
//! Early termination is only sound when GitHub returns items in
//! non-increasing creation order, which is the default (`sort=created`,
//! `direction=desc`) for both the pulls and issues listings. If a page could
//! contain newer items after an older one on a later page, those would be
//! missed.

use super::error::IntakeError;
use super::gateway::{ItemGateway, ListItemsParams};
use super::locator::RepositoryLocator;
use super::models::{ItemKind, NormalizedItem, RawItem};
use super::window::TimeWindow;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Author whose items are never reported.
pub const DEPENDENCY_BOT_LOGIN: &str = "dependabot[bot]";

/// Returns true when `item` should be reported for `kind` within `window`.
#[must_use]
pub fn qualifies(item: &RawItem, kind: ItemKind, window: &TimeWindow) -> bool {
    item.author_login() != DEPENDENCY_BOT_LOGIN
        && window.contains(item.created_at)
        && kind.accepts(item)
}

#[derive(Debug, Default)]
struct ScanProgress {
    collected: Vec<NormalizedItem>,
    pages: u32,
    reached_cutoff: bool,
}

/// Scans a repository listing for items created inside a time window.
///
/// # Example
///
/// ```ignore
/// use herald::github::{ItemFetcher, OctocrabItemGateway, TimeWindow};
/// use herald::telemetry::NoopTelemetrySink;
///
/// let gateway = OctocrabItemGateway::for_token(&token, &locator)?;
/// let fetcher = ItemFetcher::new(&gateway, &NoopTelemetrySink);
/// let items = fetcher
///     .fetch(&locator, ItemKind::PullRequest, &TimeWindow::trailing_hours(24))
///     .await;
/// ```
pub struct ItemFetcher<'client, Gateway>
where
    Gateway: ItemGateway,
{
    client: &'client Gateway,
    telemetry: &'client dyn TelemetrySink,
}

impl<'client, Gateway> ItemFetcher<'client, Gateway>
where
    Gateway: ItemGateway,
{
    /// Create a fetcher reporting to `telemetry`.
    #[must_use]
    pub const fn new(client: &'client Gateway, telemetry: &'client dyn TelemetrySink) -> Self {
        Self { client, telemetry }
    }

    /// Collects qualifying items, newest pages first.
    ///
    /// Never fails: any error aborts the scan, is logged and recorded, and
    /// yields an empty result rather than the items gathered so far.
    pub async fn fetch(
        &self,
        locator: &RepositoryLocator,
        kind: ItemKind,
        window: &TimeWindow,
    ) -> Vec<NormalizedItem> {
        let repository = format!(
            "{}/{}",
            locator.owner().as_str(),
            locator.repository().as_str()
        );
        tracing::info!(
            repository = %repository,
            cutoff = %window.cutoff().to_rfc3339(),
            "fetching new {}s",
            kind.noun()
        );
        self.telemetry.record(TelemetryEvent::ScanStarted {
            repository,
            collection: kind.collection().to_owned(),
            cutoff: window.cutoff().to_rfc3339(),
        });

        match self.scan(locator, kind, window).await {
            Ok(progress) => {
                tracing::info!(
                    pages = progress.pages,
                    matched = progress.collected.len(),
                    "fetched {} new {}(s)",
                    progress.collected.len(),
                    kind.noun()
                );
                self.telemetry.record(TelemetryEvent::ScanCompleted {
                    pages: progress.pages,
                    matched: progress.collected.len(),
                    reached_cutoff: progress.reached_cutoff,
                });
                progress.collected
            }
            Err(error) => {
                tracing::warn!("error fetching {}s: {error}", kind.noun());
                self.telemetry.record(TelemetryEvent::ScanFailed {
                    message: error.to_string(),
                });
                Vec::new()
            }
        }
    }

    async fn scan(
        &self,
        locator: &RepositoryLocator,
        kind: ItemKind,
        window: &TimeWindow,
    ) -> Result<ScanProgress, IntakeError> {
        let mut progress = ScanProgress::default();
        let mut page = 1_u32;

        loop {
            let params = ListItemsParams::page_of(kind, page);
            let listing = self.client.list_items(locator, &params).await?;
            progress.pages = page;

            let listed = listing.items.len();
            let before = progress.collected.len();
            for item in listing.items {
                if !window.contains(item.created_at) {
                    progress.reached_cutoff = true;
                }
                if qualifies(&item, kind, window) {
                    progress.collected.push(NormalizedItem::from(item));
                }
            }

            self.telemetry.record(TelemetryEvent::PageFetched {
                page,
                listed,
                matched: progress.collected.len().saturating_sub(before),
            });

            if progress.reached_cutoff {
                break;
            }
            let Some(next) = listing.page_info.next_page() else {
                break;
            };
            page = next;
        }

        Ok(progress)
    }
}
