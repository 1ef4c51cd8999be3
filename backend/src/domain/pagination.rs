//! In-memory page-of-records construction for the list endpoints.
//!
//! The store has no query planner to delegate to, so listing loads the
//! collection and this module applies the free-text filter, the sort,
//! and the page slice. Fine at boilerplate scale; the envelope metadata
//! is what clients page on.

use shared::Page;

use crate::domain::commands::ListCommand;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Sentinel `page` value that disables pagination and returns the whole
/// result set as a single page.
pub const PAGE_ALL: &str = "all";

/// Filter, sort, and slice `items` according to `list`.
///
/// `search_text` yields the fields the free-text query matches against
/// (case-insensitive substring). `sort_key` designates the field the
/// listing is ordered by; `sort=desc` reverses it.
pub fn paginate<T>(
    items: Vec<T>,
    list: &ListCommand,
    search_text: impl Fn(&T) -> Vec<String>,
    sort_key: impl Fn(&T) -> String,
) -> Page<T> {
    let mut items = items;

    let needle = list
        .query
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    if !needle.is_empty() {
        items.retain(|item| {
            search_text(item)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });
    }

    items.sort_by_key(|item| sort_key(item));
    if list.sort.as_deref() == Some("desc") {
        items.reverse();
    }

    let total_docs = items.len() as u64;

    if list.page.as_deref() == Some(PAGE_ALL) {
        return Page {
            limit: total_docs,
            docs: items,
            total_docs,
            page: 1,
            total_pages: 1,
            has_prev_page: false,
            has_next_page: false,
        };
    }

    let page = list
        .page
        .as_deref()
        .and_then(|p| p.parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE);
    let limit = list
        .limit
        .map(|l| u64::from(l).max(1))
        .unwrap_or(DEFAULT_LIMIT);

    let total_pages = total_docs.div_ceil(limit).max(1);
    let docs = items
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();

    Page {
        docs,
        total_docs,
        limit,
        page,
        total_pages,
        has_prev_page: page > 1,
        has_next_page: page < total_pages,
    }
}
