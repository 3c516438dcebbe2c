use serde::{Deserialize, Serialize};

use super::pagination::DEFAULT_PER_PAGE;

/// Filter half of a list request. Every field is optional and a `None`
/// field must not reach the query string, so the backend default applies.
pub trait ListFilter: Serialize + Clone + Default + PartialEq {
    /// Canonical form: blank text becomes `None`, text is trimmed.
    fn normalized(&self) -> Self {
        self.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Запрос страницы списка: пагинация + фильтр
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery<F> {
    pub page: u32,
    pub per_page: u32,
    pub filter: F,
}

impl<F: ListFilter> ListingQuery<F> {
    pub fn new(page: u32, per_page: u32, filter: F) -> Self {
        Self {
            page: page.max(1),
            per_page,
            filter,
        }
    }

    /// `page=..&per_page=..` followed by the set filter fields only.
    pub fn to_query_string(&self) -> Result<String, serde_qs::Error> {
        let paging = serde_qs::to_string(&PageParams {
            page: self.page,
            per_page: self.per_page,
        })?;
        let filter = serde_qs::to_string(&self.filter.normalized())?;
        if filter.is_empty() {
            Ok(paging)
        } else {
            Ok(format!("{}&{}", paging, filter))
        }
    }
}

/// Trims `value` and drops it when nothing is left.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
