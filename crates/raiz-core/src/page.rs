use serde::{Deserialize, Serialize};

///
/// PageRequest
///
/// 1-based page selection over an already-filtered list.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Create a page request; `page` and `per_page` are floored at 1.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// First page at the same page size.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }
}

///
/// Paged
///
/// One materialized page plus the counts the pagination chrome needs.
///
/// Invariants:
/// - `items.len() <= per_page`
/// - `total_pages == ceil(total / per_page)`
/// - `page` is clamped into `1..=max(total_pages, 1)`
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Paged<T> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice one page out of a filtered list.
///
/// A request past the end clamps to the last page rather than returning an
/// empty page; an empty list yields page 1 of 0 pages.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Paged<T> {
    let request = PageRequest::new(request.page, request.per_page);
    let total = items.len() as u32;
    let total_pages = total.div_ceil(request.per_page);
    let page = request.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * request.per_page;
    let items = items
        .into_iter()
        .skip(start as usize)
        .take(request.per_page as usize)
        .collect();

    Paged {
        items,
        total,
        page,
        per_page: request.per_page,
        total_pages,
    }
}

///
/// TESTS
///
