//! Client-side ordering of an already loaded page.
//!
//! The backend decides which rows land on a page; sorting here only reorders
//! those rows. Missing values always go last, whichever direction is active.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortOrder::Asc
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Текущая сортировка списка: поле + направление
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: Copy + PartialEq> SortSpec<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    /// Header click: the active field flips direction, any other field
    /// becomes active in ascending order.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.order = self.order.flipped();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }

    /// Индикатор сортировки для заголовка колонки
    pub fn indicator(&self, field: F) -> &'static str {
        if self.field != field {
            " ⇅"
        } else if self.order.is_ascending() {
            " ▲"
        } else {
            " ▼"
        }
    }
}

/// Value a record exposes for one sortable column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl<'a> From<Option<&'a str>> for SortKey<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map(SortKey::Text).unwrap_or(SortKey::Missing)
    }
}

impl From<Option<f64>> for SortKey<'_> {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => SortKey::Number(v),
            _ => SortKey::Missing,
        }
    }
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    type Field: Copy + PartialEq;

    fn sort_key(&self, field: Self::Field) -> SortKey<'_>;
}

/// Case-folded comparison with a case-sensitive tie-break, so "apple" and
/// "Apple" sit together but still order deterministically.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

pub fn compare_keys(a: SortKey<'_>, b: SortKey<'_>, order: SortOrder) -> Ordering {
    match (a, b) {
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        (SortKey::Text(x), SortKey::Text(y)) => order.apply(compare_text(x, y)),
        (SortKey::Number(x), SortKey::Number(y)) => order.apply(x.total_cmp(&y)),
        // Columns never mix kinds; numbers first keeps the order total anyway.
        (SortKey::Number(_), SortKey::Text(_)) => order.apply(Ordering::Less),
        (SortKey::Text(_), SortKey::Number(_)) => order.apply(Ordering::Greater),
    }
}

/// Сортирует загруженную страницу (стабильно)
pub fn sort_records<T: Sortable>(items: &mut [T], spec: &SortSpec<T::Field>) {
    items.sort_by(|a, b| compare_keys(a.sort_key(spec.field), b.sort_key(spec.field), spec.order));
}
