//! Application operations: load from the store, apply domain rules, persist,
//! then notify subscribers. `user_id` is always the already-authenticated
//! caller; records owned by anyone else read as not found.

pub mod admin;
pub mod analytics;
pub mod demo;
pub mod goals;
pub mod health;
pub mod streak;
pub mod users;
pub mod workouts;

use uuid::Uuid;

use crate::db::Dataset;
use crate::error::{DomainError, DomainResult};
use crate::models::user::User;

pub(crate) fn user(data: &Dataset, user_id: Uuid) -> DomainResult<&User> {
    data.users
        .iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| DomainError::not_found("User", user_id))
}

pub(crate) fn user_mut(data: &mut Dataset, user_id: Uuid) -> DomainResult<&mut User> {
    data.users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| DomainError::not_found("User", user_id))
}
