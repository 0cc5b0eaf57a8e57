pub mod goal;
pub mod streak;
pub mod user;
pub mod workout;
