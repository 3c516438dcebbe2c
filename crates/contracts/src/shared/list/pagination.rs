use serde::{Deserialize, Serialize};

/// Page size used by the product list when nothing else is chosen
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound the backend accepts for `per_page`
pub const MAX_PER_PAGE: u32 = 100;

/// Страница результатов в формате backend: `{items, total, page, pages}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Offset of the first row of a 1-based page
pub fn page_offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

/// 1-based inclusive range of rows shown on `page`, `None` for an empty list.
/// Used for the "Showing X to Y of Z" caption.
pub fn shown_range(page: u32, per_page: u32, total: u64) -> Option<(u64, u64)> {
    let first = page_offset(page, per_page) + 1;
    if total == 0 || first > total {
        return None;
    }
    let last = (first + u64::from(per_page) - 1).min(total);
    Some((first, last))
}

/// Page numbers for the pager buttons: at most `width` pages centred on the
/// current one, shifted so the window never runs past either end.
pub fn page_window(current: u32, pages: u32, width: u32) -> Vec<u32> {
    if pages == 0 || width == 0 {
        return Vec::new();
    }
    let width = width.min(pages);
    let current = current.clamp(1, pages);
    let half = width / 2;
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(pages - width + 1);
    (start..start + width).collect()
}
