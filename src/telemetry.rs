//! Monitor telemetry events and sinks.
//!
//! The pipeline never writes to the console directly. Every notable step is
//! reported as a [`TelemetryEvent`] to an injected [`TelemetrySink`], which
//! keeps the core testable without capturing process output.

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the monitor pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A scan of the repository listing began.
    ScanStarted {
        /// `owner/repo` being scanned.
        repository: String,
        /// Collection being listed (`pulls` or `issues`).
        collection: String,
        /// Inclusive cutoff as an RFC 3339 timestamp.
        cutoff: String,
    },
    /// One page was fetched and filtered.
    PageFetched {
        /// Page number (1-based).
        page: u32,
        /// Items GitHub returned on the page.
        listed: usize,
        /// Items on the page that qualified.
        matched: usize,
    },
    /// The scan finished successfully.
    ScanCompleted {
        /// Pages requested.
        pages: u32,
        /// Items collected across all pages.
        matched: usize,
        /// Whether the scan stopped because an item predated the cutoff.
        reached_cutoff: bool,
    },
    /// The scan failed and its partial results were discarded.
    ScanFailed {
        /// Failure detail.
        message: String,
    },
    /// Dispatch was skipped because of a configuration gap.
    DispatchSkipped {
        /// Why nothing was sent.
        reason: String,
    },
    /// A notifier delivered the batch.
    NotificationDelivered {
        /// Backend name.
        notifier: String,
        /// Items delivered.
        items: usize,
    },
    /// A notifier failed to deliver the batch.
    NotificationFailed {
        /// Backend name.
        notifier: String,
        /// Failure detail.
        message: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Forwards telemetry events to `tracing` as JSON payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        match event {
            TelemetryEvent::ScanFailed { .. } | TelemetryEvent::NotificationFailed { .. } => {
                tracing::warn!(target: "herald::telemetry", "{serialised}");
            }
            TelemetryEvent::PageFetched { .. } => {
                tracing::debug!(target: "herald::telemetry", "{serialised}");
            }
            _ => tracing::info!(target: "herald::telemetry", "{serialised}"),
        }
    }
}
