//! Pure domain logic. Nothing in here performs I/O.

pub mod analytics;
pub mod goals;
pub mod streak;
pub mod users;
pub mod workouts;
