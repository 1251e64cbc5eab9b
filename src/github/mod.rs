//! GitHub item discovery.
//!
//! This module wraps Octocrab to list open pull requests or issues, filters
//! them against an alert window, and normalizes the survivors into records
//! that notifiers can render. Octocrab errors are mapped into `IntakeError`
//! variants so callers never see Octocrab internals.

pub mod error;
pub mod fetcher;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod window;

pub use error::IntakeError;
pub use fetcher::{DEPENDENCY_BOT_LOGIN, ItemFetcher, qualifies};
pub use gateway::{ItemGateway, ItemPage, ListItemsParams, OctocrabItemGateway};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{ItemKind, NormalizedItem, RawItem};
pub use pagination::PageInfo;
pub use window::TimeWindow;

#[cfg(test)]
pub use gateway::MockItemGateway;

#[cfg(test)]
mod tests;
