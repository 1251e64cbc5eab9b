//! Pagination state for GitHub listing responses.

/// Largest page size GitHub accepts for listing endpoints.
pub const MAX_PER_PAGE: u8 = 100;

/// Page a listing response came from and whether GitHub advertised another.
///
/// # Example
///
/// ```
/// use herald::github::pagination::PageInfo;
///
/// let info = PageInfo::new(2).with_has_next(true);
/// assert_eq!(info.next_page(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Page number (1-based).
    page: u32,
    /// Whether the `Link` header carried `rel="next"`.
    has_next: bool,
}

impl PageInfo {
    /// Page `page` with no successor.
    #[must_use]
    pub const fn new(page: u32) -> Self {
        Self {
            page,
            has_next: false,
        }
    }

    /// Sets whether there is a next page.
    #[must_use]
    pub const fn with_has_next(mut self, has_next: bool) -> Self {
        self.has_next = has_next;
        self
    }

    /// Returns true if more pages exist after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Number of the following page, when one exists.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_next {
            self.page.checked_add(1)
        } else {
            None
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1)
    }
}
