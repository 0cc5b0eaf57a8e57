use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, ChangeKind};
use crate::models::user::{
    NotificationSettingsRequest, Role, SignupRequest, Theme, UpdateProfileRequest, User,
    UserProfile,
};
use crate::services::users;
use crate::AppState;

use super::user_mut;

pub async fn signup(
    state: &AppState,
    body: SignupRequest,
    now: DateTime<Utc>,
) -> AppResult<UserProfile> {
    let user = state
        .store
        .write(|data| {
            let mut user = users::new_profile(Uuid::new_v4(), body, now)?;
            if data
                .users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(AppError::Conflict("Email already registered".into()));
            }
            if state.config.is_admin_email(&user.email) {
                user.role = Role::Admin;
            }
            data.users.push(user.clone());
            Ok(user)
        })
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");
    state.publish(ChangeEvent::new(ChangeKind::ProfileChanged, user.id, None));
    Ok(user.into())
}

pub async fn get_profile(state: &AppState, user_id: Uuid) -> AppResult<UserProfile> {
    let user = state
        .store
        .read(|data| super::user(data, user_id).cloned())
        .await?;
    Ok(user.into())
}

pub async fn find_by_email(state: &AppState, email: &str) -> Option<User> {
    state
        .store
        .read(|data| {
            data.users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
                .cloned()
        })
        .await
}

pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    body: UpdateProfileRequest,
) -> AppResult<UserProfile> {
    let user = state
        .store
        .write(|data| {
            if let Some(email) = body.email.as_deref() {
                let taken = data
                    .users
                    .iter()
                    .any(|u| u.id != user_id && u.email.eq_ignore_ascii_case(email.trim()));
                if taken {
                    return Err(AppError::Conflict("Email already registered".into()));
                }
            }
            let user = user_mut(data, user_id)?;
            users::apply_profile_update(user, body)?;
            Ok(user.clone())
        })
        .await?;

    state.publish(ChangeEvent::new(ChangeKind::ProfileChanged, user_id, None));
    Ok(user.into())
}

pub async fn update_theme(state: &AppState, user_id: Uuid, theme: Theme) -> AppResult<UserProfile> {
    update_profile(
        state,
        user_id,
        UpdateProfileRequest {
            theme: Some(theme),
            ..Default::default()
        },
    )
    .await
}

pub async fn update_notifications(
    state: &AppState,
    user_id: Uuid,
    body: NotificationSettingsRequest,
) -> AppResult<UserProfile> {
    let user = state
        .store
        .write(|data| {
            let user = user_mut(data, user_id)?;
            users::set_notifications(user, body)?;
            Ok::<_, AppError>(user.clone())
        })
        .await?;

    state.publish(ChangeEvent::new(ChangeKind::ProfileChanged, user_id, None));
    Ok(user.into())
}

/// Whether the dashboard should nag: reminders on and nothing logged today.
pub async fn needs_reminder(state: &AppState, user_id: Uuid, today: NaiveDate) -> AppResult<bool> {
    state
        .store
        .read(|data| {
            let user = super::user(data, user_id)?;
            let logged_today = data
                .workouts
                .iter()
                .any(|w| w.user_id == user_id && w.date == today);
            Ok(user.reminders_enabled && !logged_today)
        })
        .await
}
