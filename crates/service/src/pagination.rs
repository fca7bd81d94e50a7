//! Pagination window for list queries.
//!
//! Zero-based: `page = 0, page_size = 2` is the first two rows. Windowing
//! only activates when both query parameters arrive; one-sided input means
//! "no window", not an error.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Build a window only when both parts are present.
    pub fn from_parts(page: Option<u64>, page_size: Option<u64>) -> Option<Self> {
        match (page, page_size) {
            (Some(page), Some(page_size)) => Some(Self { page, page_size }),
            _ => None,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}
