//! Domain logic for the event desk: shared types, errors, home-listing filter
//! resolution, dashboard views, and form validation. No I/O lives here.

pub mod dashboard;
pub mod error;
pub mod forms;
pub mod listing;
pub mod types;
