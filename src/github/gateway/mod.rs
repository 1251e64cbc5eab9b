//! Gateways for listing repository items through Octocrab.
//!
//! The `ItemGateway` trait is the seam between the fetcher and GitHub: tests
//! mock it, while `OctocrabItemGateway` issues the real HTTP requests.

mod client;
mod error_mapping;
mod listing;

pub use listing::{ItemPage, ListItemsParams, OctocrabItemGateway};

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::locator::RepositoryLocator;

/// Gateway that lists one page of open repository items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemGateway: Send + Sync {
    /// Fetch the page described by `params`.
    async fn list_items(
        &self,
        locator: &RepositoryLocator,
        params: &ListItemsParams,
    ) -> Result<ItemPage, IntakeError>;
}
