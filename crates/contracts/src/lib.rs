//! Wire contracts of the price-sync API as the dashboard client sees them.
//!
//! Everything here is transport-level data plus the small amount of pure
//! logic that belongs next to it (bulk paste parsing, client-side sorting,
//! pagination arithmetic, dashboard stats).

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
