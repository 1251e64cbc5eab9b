//! Public types for item listing operations.

use crate::github::models::{ItemKind, RawItem};
use crate::github::pagination::{MAX_PER_PAGE, PageInfo};

/// Parameters for listing open items.
///
/// The state filter is always `open`; closed and merged items are never
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemsParams {
    /// Which collection to list.
    pub kind: ItemKind,
    /// Page number to fetch (1-based).
    pub page: u32,
    /// Items per page (max 100).
    pub per_page: u8,
}

impl ListItemsParams {
    /// Parameters for `page` of `kind` at the maximum page size.
    #[must_use]
    pub const fn page_of(kind: ItemKind, page: u32) -> Self {
        Self {
            kind,
            page,
            per_page: MAX_PER_PAGE,
        }
    }
}

impl Default for ListItemsParams {
    fn default() -> Self {
        Self::page_of(ItemKind::PullRequest, 1)
    }
}

/// One page of listed items.
#[derive(Debug, Clone)]
pub struct ItemPage {
    /// Items in the order GitHub returned them.
    pub items: Vec<RawItem>,
    /// Pagination state.
    pub page_info: PageInfo,
}
