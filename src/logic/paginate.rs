//! "Load more" pagination over a derived listing.

/// Where a listing is shown; fixes the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageContext {
    /// Landing-page section.
    Landing,
    /// Full catalog view.
    #[default]
    Catalog,
}

impl PageContext {
    /// Records revealed per page.
    #[must_use]
    pub const fn page_size(self) -> usize {
        match self {
            Self::Landing => 8,
            Self::Catalog => 20,
        }
    }
}

/// Displayed-count cursor.
///
/// Starts at one page, grows one page per effective load-more, and only
/// shrinks through [`Pagination::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page size for this context.
    page_size: usize,
    /// Number of records currently shown (upper bound; may exceed the list).
    displayed: usize,
}

impl Pagination {
    /// Start at one page for `context`.
    #[must_use]
    pub const fn new(context: PageContext) -> Self {
        let page_size = context.page_size();
        Self {
            page_size,
            displayed: page_size,
        }
    }

    /// Page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current displayed count.
    #[must_use]
    pub const fn displayed(&self) -> usize {
        self.displayed
    }

    /// What: Reveal one more page when it would show at least one new record.
    ///
    /// Inputs:
    /// - `total`: Length of the filtered/sorted list
    ///
    /// Output:
    /// - `true` when the displayed count advanced; `false` for a stale click.
    pub const fn load_more(&mut self, total: usize) -> bool {
        if self.displayed >= total {
            return false;
        }
        self.displayed = self.displayed.saturating_add(self.page_size);
        true
    }

    /// Back to one page (called on every criteria change).
    pub const fn reset(&mut self) {
        self.displayed = self.page_size;
    }

    /// Length of the visible prefix of a list of `total` records.
    #[must_use]
    pub fn visible_len(&self, total: usize) -> usize {
        self.displayed.min(total)
    }

    /// Whether records remain beyond the visible prefix.
    #[must_use]
    pub const fn has_more(&self, total: usize) -> bool {
        self.displayed < total
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageContext::default())
    }
}
