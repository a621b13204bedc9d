//! Paged result envelope returned by windowed listings.

use serde::{Deserialize, Serialize};

/// One window of an ordered result set plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of matching rows across all pages.
    pub total: u64,
    /// 1-based page index this window represents.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, size: u32) -> Self {
        Self {
            items,
            total,
            page,
            size,
        }
    }

    /// Number of pages needed to cover `total` rows (0 when empty).
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }

    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Row offset of the first item in this window.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}
