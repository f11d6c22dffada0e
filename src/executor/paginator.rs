//! Pagination
//!
//! Clamps the requested page against the filtered total and computes the
//! slice window. Pushdown sources use the same arithmetic for LIMIT/OFFSET.

use serde::Serialize;

use crate::planner::PageRequest;

/// Resolved page window, serialized as the `pagination` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Records matching the filter, across all pages
    pub total: u64,
    /// Page actually served (after clamping)
    pub page: u64,
    pub limit: u64,
    /// ceil(total / limit); zero when nothing matched
    pub total_pages: u64,
    #[serde(skip)]
    pub offset: u64,
}

/// Resolves page windows
pub struct Paginator;

impl Paginator {
    /// Clamps `request` against `total` matching records.
    ///
    /// Below 1 becomes 1. Above the last page becomes the last page, unless
    /// there are no pages at all, in which case the request is kept and the
    /// slice is simply empty.
    pub fn resolve(total: u64, request: PageRequest) -> PageInfo {
        let limit = request.limit.max(1);
        let total_pages = total.div_ceil(limit);

        let mut page = if request.page < 1 { 1 } else { request.page as u64 };
        if page > total_pages && total_pages > 0 {
            page = total_pages;
        }

        PageInfo {
            total,
            page,
            limit,
            total_pages,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// Returns the window of `items` described by `info`
    pub fn slice<'a, T>(items: &'a [T], info: &PageInfo) -> &'a [T] {
        let len = items.len() as u64;
        let start = info.offset.min(len) as usize;
        let end = info.offset.saturating_add(info.limit).min(len) as usize;
        &items[start..end]
    }
}
