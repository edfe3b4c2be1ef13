//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument and return plain data.

pub mod category_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod participant_repo;

pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use participant_repo::ParticipantRepo;
