pub mod controller;

pub use controller::{FetchOutcome, FetchTicket, ListSource, ListingController};
