//! Pagination metadata.

use serde::Serialize;

/// Pager state for rendering page links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Current page, 1-based, clamped into the valid range.
    pub page: usize,
    /// Total number of pages. At least 1: zero results still render one
    /// empty page.
    pub total_pages: usize,
    /// Previous page number, when there is one.
    pub prev: Option<usize>,
    /// Next page number, when there is one.
    pub next: Option<usize>,
}

/// Computes pager state for `total` results split into pages of
/// `page_size`.
///
/// Pure function of its inputs. A `page` of 0 or beyond the last page is
/// clamped into range, and `total == 0` yields a single empty page; no
/// input combination fails.
pub fn paginate(page: usize, total: u64, page_size: usize) -> PageMeta {
    // Upstream resolution guarantees a positive page size; keep the
    // function total anyway.
    let per_page = page_size.max(1) as u64;
    let total_pages = usize::try_from(total.div_ceil(per_page))
        .unwrap_or(usize::MAX)
        .max(1);

    let page = page.clamp(1, total_pages);

    PageMeta {
        page,
        total_pages,
        prev: (page > 1).then(|| page - 1),
        next: (page < total_pages).then(|| page + 1),
    }
}
