//! Chat notification backends and routing.
//!
//! Every backend implements [`Notifier`]: deliver a batch of normalized items
//! for a named repository and item kind. [`dispatch`] picks exactly one
//! backend from a [`NotifierSelection`] and never lets a failure escape.

pub mod discord;
pub mod dispatch;
pub mod error;
pub mod mentions;
pub mod render;
pub mod slack;

use std::time::Duration;

use async_trait::async_trait;

use crate::github::{ItemKind, NormalizedItem};

pub use discord::{DiscordNotifier, DiscordSettings};
pub use dispatch::{DispatchOutcome, NotifierSelection, deliver, dispatch, resolve_notifier};
pub use error::{ConfigurationGap, DeliveryError};
pub use mentions::{MentionKind, Mentions};
pub use slack::{SlackNotifier, SlackSettings};

/// Per-request timeout applied to every notification HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A backend that can deliver a batch of items to people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short backend name used in logs and telemetry.
    fn name(&self) -> &'static str;

    /// Deliver `items` discovered in `repository`.
    async fn notify(
        &self,
        items: &[NormalizedItem],
        repository: &str,
        kind: ItemKind,
    ) -> Result<(), DeliveryError>;
}
