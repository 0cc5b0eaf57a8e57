use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, ChangeKind};
use crate::models::goal::{CreateGoalRequest, Goal, GoalProgress, UpdateGoalRequest};
use crate::services::goals::{self, GoalStore};
use crate::AppState;

pub async fn create_goal(
    state: &AppState,
    user_id: Uuid,
    body: CreateGoalRequest,
    now: DateTime<Utc>,
) -> AppResult<Goal> {
    let goal = state
        .store
        .write(|data| {
            super::user(data, user_id)?;
            GoalStore::new(&mut data.goals)
                .create(user_id, body, now)
                .map_err(AppError::from)
        })
        .await?;

    tracing::debug!(user_id = %user_id, goal_id = %goal.id, "Goal created");
    state.publish(ChangeEvent::new(ChangeKind::GoalChanged, user_id, Some(goal.id)));
    Ok(goal)
}

pub async fn list_goals(state: &AppState, user_id: Uuid) -> AppResult<Vec<Goal>> {
    Ok(state
        .store
        .read(|data| goals::list_for_user(&data.goals, user_id))
        .await)
}

pub async fn get_goal(state: &AppState, user_id: Uuid, goal_id: Uuid) -> AppResult<Goal> {
    let goal = state
        .store
        .read(|data| goals::find_owned(&data.goals, user_id, goal_id).cloned())
        .await?;
    Ok(goal)
}

pub async fn update_goal(
    state: &AppState,
    user_id: Uuid,
    goal_id: Uuid,
    body: UpdateGoalRequest,
) -> AppResult<Goal> {
    let goal = state
        .store
        .write(|data| {
            goals::find_owned(&data.goals, user_id, goal_id)?;
            GoalStore::new(&mut data.goals).update(goal_id, body)
        })
        .await?;

    state.publish(ChangeEvent::new(ChangeKind::GoalChanged, user_id, Some(goal_id)));
    Ok(goal)
}

pub async fn toggle_goal(state: &AppState, user_id: Uuid, goal_id: Uuid) -> AppResult<Goal> {
    let goal = state
        .store
        .write(|data| {
            goals::find_owned(&data.goals, user_id, goal_id)?;
            GoalStore::new(&mut data.goals).toggle_complete(goal_id)
        })
        .await?;

    state.publish(ChangeEvent::new(ChangeKind::GoalChanged, user_id, Some(goal_id)));
    Ok(goal)
}

/// Idempotent: deleting a goal that is already gone (or never was the
/// caller's) succeeds and reports `false`.
pub async fn delete_goal(state: &AppState, user_id: Uuid, goal_id: Uuid) -> AppResult<bool> {
    let deleted = state
        .store
        .write(|data| {
            if goals::find_owned(&data.goals, user_id, goal_id).is_err() {
                return Ok(false);
            }
            GoalStore::new(&mut data.goals).delete(goal_id)
        })
        .await?;

    if deleted {
        state.publish(ChangeEvent::new(ChangeKind::GoalDeleted, user_id, Some(goal_id)));
    }
    Ok(deleted)
}

pub async fn goal_progress(state: &AppState, user_id: Uuid) -> AppResult<GoalProgress> {
    Ok(state
        .store
        .read(|data| goals::progress(&data.goals, user_id))
        .await)
}
