//! Admin dashboard operations. Every call checks the acting user's role.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::Dataset;
use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, ChangeKind};
use crate::models::user::{AdminOverview, Role, UserProfile};
use crate::services::users;
use crate::AppState;

fn require_admin(data: &Dataset, actor: Uuid) -> AppResult<()> {
    let user = super::user(data, actor)?;
    if !user.role.is_admin() {
        tracing::warn!(user_id = %actor, role = ?user.role, "Non-admin attempted admin operation");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub async fn list_users(state: &AppState, actor: Uuid) -> AppResult<Vec<UserProfile>> {
    let users = state
        .store
        .read(|data| {
            require_admin(data, actor)?;
            let mut users = data.users.clone();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok::<_, AppError>(users)
        })
        .await?;
    Ok(users.into_iter().map(UserProfile::from).collect())
}

pub async fn set_role(
    state: &AppState,
    actor: Uuid,
    user_id: Uuid,
    role: Role,
) -> AppResult<UserProfile> {
    let user = state
        .store
        .write(|data| {
            require_admin(data, actor)?;
            let user = super::user_mut(data, user_id)?;
            user.role = role;
            Ok::<_, AppError>(user.clone())
        })
        .await?;

    tracing::info!(actor = %actor, user_id = %user_id, role = ?role, "Role changed");
    state.publish(ChangeEvent::new(ChangeKind::ProfileChanged, user_id, None));
    Ok(user.into())
}

/// Removes the user with their goals, workouts and streak. Idempotent.
pub async fn delete_user(state: &AppState, actor: Uuid, user_id: Uuid) -> AppResult<bool> {
    let deleted = state
        .store
        .write(|data| {
            require_admin(data, actor)?;
            if actor == user_id {
                return Err(AppError::Conflict("Admins cannot delete themselves".into()));
            }
            let before = data.users.len();
            data.users.retain(|u| u.id != user_id);
            if data.users.len() == before {
                return Ok(false);
            }
            data.goals.retain(|g| g.user_id != user_id);
            data.workouts.retain(|w| w.user_id != user_id);
            data.streaks.retain(|s| s.user_id != user_id);
            Ok(true)
        })
        .await?;

    if deleted {
        tracing::info!(actor = %actor, user_id = %user_id, "User deleted");
        state.publish(ChangeEvent::new(ChangeKind::UserDeleted, user_id, None));
    }
    Ok(deleted)
}

pub async fn overview(state: &AppState, actor: Uuid, today: NaiveDate) -> AppResult<AdminOverview> {
    state
        .store
        .read(|data| {
            require_admin(data, actor)?;
            Ok::<_, AppError>(users::admin_overview(&data.users, &data.workouts, today))
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StoreBackend};
    use crate::db::{MemoryBackend, Store};
    use crate::handlers::goals::{create_goal, list_goals};
    use crate::handlers::streak::log_streak;
    use crate::handlers::workouts::log_workout;
    use crate::models::goal::CreateGoalRequest;
    use crate::models::workout::CreateWorkoutRequest;
    use crate::test_utils::{date, signup, test_state};
    use chrono::Utc;

    async fn state_with_admin() -> (AppState, Uuid) {
        let config = Config {
            store_backend: StoreBackend::Memory,
            admin_emails: vec!["boss@example.com".into()],
            ..Config::default()
        };
        let store = Store::open(Box::new(MemoryBackend::new())).await.unwrap();
        let state = AppState::new(store, config);
        let admin = signup(&state, "Boss@example.com").await;
        (state, admin)
    }

    #[tokio::test]
    async fn test_regular_user_is_forbidden() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;
        let err = list_users(&state, me).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
        let err = overview(&state, me, date(2024, 3, 4)).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_admin_lists_and_promotes() {
        let (state, admin) = state_with_admin().await;
        let member = signup(&state, "member@example.com").await;

        assert_eq!(list_users(&state, admin).await.unwrap().len(), 2);

        let promoted = set_role(&state, admin, member, Role::Admin).await.unwrap();
        assert_eq!(promoted.role, Role::Admin);
        assert!(list_users(&state, member).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_cascades_and_is_idempotent() {
        let (state, admin) = state_with_admin().await;
        let member = signup(&state, "member@example.com").await;
        let today = date(2024, 3, 4);

        create_goal(
            &state,
            member,
            CreateGoalRequest {
                title: "Swim a mile".into(),
                ..Default::default()
            },
            Utc::now(),
        )
        .await
        .unwrap();
        log_workout(
            &state,
            member,
            CreateWorkoutRequest {
                name: "Laps".into(),
                workout_type: Some("Swimming".into()),
                duration: Some(40),
                difficulty: None,
                calories: Some(350),
                notes: None,
                date: today,
            },
        )
        .await
        .unwrap();
        log_streak(&state, member, today).await.unwrap();

        let before = overview(&state, admin, today).await.unwrap();
        assert_eq!(before, AdminOverview { users: 2, workouts: 1, workouts_today: 1 });

        assert!(delete_user(&state, admin, member).await.unwrap());
        assert!(!delete_user(&state, admin, member).await.unwrap());

        assert!(list_goals(&state, member).await.unwrap().is_empty());
        let (workouts, streaks) = state
            .store
            .read(|data| (data.workouts.len(), data.streaks.len()))
            .await;
        assert_eq!((workouts, streaks), (0, 0));
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let (state, admin) = state_with_admin().await;
        let err = delete_user(&state, admin, admin).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }
}
