//! Primitives shared by every list view: paging, filtering, sorting.

pub mod pagination;
pub mod query;
pub mod sort;

use std::fmt::Debug;
use std::hash::Hash;

pub use pagination::{Paginated, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use query::{ListFilter, ListingQuery};
pub use sort::{SortKey, SortOrder, SortSpec, Sortable};

/// A row of a list view. The id keys checkbox selection, so it has to stay
/// stable across re-sorting of the same page.
pub trait ListRecord: Sortable {
    type Id: Clone + Eq + Hash + Debug;

    fn record_id(&self) -> Self::Id;
}
