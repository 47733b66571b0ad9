//! 1-based pagination.

use serde::Serialize;

/// Cats per page in the public grid.
pub const CAT_GRID_PAGE_SIZE: u32 = 12;
/// Breeds per page in the breed browser and `GET /api/breeds`.
pub const BREED_PAGE_SIZE: u32 = 10;
/// Rows per page in admin tables and `GET /api/cats`.
pub const ADMIN_PAGE_SIZE: u32 = 10;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page, starting at 1.
    pub page: u32,
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            page,
            per_page,
            total,
        }
    }

    /// Number of pages. An empty result still has one page.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 || self.total == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Convert the items, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Normalize a requested page number. Missing or zero becomes 1.
#[must_use]
pub fn page_number(requested: Option<u32>) -> u32 {
    requested.unwrap_or(1).max(1)
}

/// SQL `OFFSET` for a 1-based page.
#[must_use]
pub fn offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

/// Page through an in-memory list.
///
/// Pages past the end yield no items.
#[must_use]
pub fn paginate<T: Clone>(all: &[T], page: u32, per_page: u32) -> Page<T> {
    let page = page.max(1);
    let start = usize::try_from(offset(page, per_page)).unwrap_or(usize::MAX);
    let items = all
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect();
    Page::new(items, page, per_page, all.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_page() {
        let all: Vec<u32> = (1..=25).collect();
        let page = paginate(&all, 2, 12);
        assert_eq!(page.items, (13..=24).collect::<Vec<_>>());
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let all: Vec<u32> = (1..=25).collect();
        let page = paginate(&all, 3, 12);
        assert_eq!(page.items, vec![25]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_out_of_range() {
        let all: Vec<u32> = (1..=5).collect();
        let page = paginate(&all, 9, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_page_zero_is_first() {
        let all: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&all, 0, 2).items, vec![1, 2]);
        assert_eq!(page_number(Some(0)), 1);
        assert_eq!(page_number(None), 1);
    }

    #[test]
    fn test_empty_has_one_page() {
        let page: Page<u32> = Page::new(Vec::new(), 1, 10, 0);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_offset() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 10), 20);
    }
}
