//! Octocrab-backed gateway listing open pull requests or issues.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::error::IntakeError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::RawItem;
use crate::github::pagination::{MAX_PER_PAGE, PageInfo};

use super::ItemGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

mod types;

pub use types::{ItemPage, ListItemsParams};

/// Only open items are ever listed.
const OPEN_STATE: &str = "open";

/// Octocrab-backed item gateway.
pub struct OctocrabItemGateway {
    client: Octocrab,
}

impl OctocrabItemGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the base URI cannot be parsed or
    /// `IntakeError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, IntakeError> {
        let octocrab = build_octocrab_client(token, locator)?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl ItemGateway for OctocrabItemGateway {
    async fn list_items(
        &self,
        locator: &RepositoryLocator,
        params: &ListItemsParams,
    ) -> Result<ItemPage, IntakeError> {
        validate_pagination_params(params.page, params.per_page)?;

        let page_str = params.page.to_string();
        let per_page_str = params.per_page.to_string();

        let query_params = [
            ("state", OPEN_STATE),
            ("per_page", per_page_str.as_str()),
            ("page", page_str.as_str()),
        ];

        let operation = format!("list {}", params.kind.collection());
        let page_result: Page<RawItem> = self
            .client
            .get(locator.items_path(params.kind), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error(&operation, &error))?;

        let has_next = page_result.next.is_some();
        tracing::debug!(
            page = params.page,
            items = page_result.items.len(),
            has_next,
            "fetched {} page",
            params.kind.collection()
        );

        Ok(ItemPage {
            items: page_result.items,
            page_info: PageInfo::new(params.page).with_has_next(has_next),
        })
    }
}

fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), IntakeError> {
    if page == 0 {
        return Err(IntakeError::InvalidPagination {
            message: "page must be at least 1".to_owned(),
        });
    }

    if per_page == 0 {
        return Err(IntakeError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_PER_PAGE {
        return Err(IntakeError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}
