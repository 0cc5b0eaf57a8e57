//! Profile rules: signup defaults, edits, theme, role and reminder settings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::user::{
    AdminOverview, NotificationSettingsRequest, Role, SignupRequest, Theme, UpdateProfileRequest,
    User, DEFAULT_REMINDER_TIME,
};
use crate::models::workout::Workout;

pub const GUEST_NAME: &str = "Guest User";

pub fn new_profile(id: Uuid, input: SignupRequest, now: DateTime<Utc>) -> DomainResult<User> {
    input.validate()?;

    let name = input
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "User".to_string());

    Ok(User {
        id,
        name,
        email: input.email.trim().to_string(),
        avatar: input.avatar.unwrap_or_default(),
        theme: Theme::Light,
        role: Role::User,
        reminder_time: DEFAULT_REMINDER_TIME.to_string(),
        reminders_enabled: false,
        created_at: now,
    })
}

pub fn guest_profile(id: Uuid, email: &str, now: DateTime<Utc>) -> User {
    User {
        id,
        name: GUEST_NAME.to_string(),
        email: email.to_string(),
        avatar: String::new(),
        theme: Theme::Light,
        role: Role::Guest,
        reminder_time: DEFAULT_REMINDER_TIME.to_string(),
        reminders_enabled: false,
        created_at: now,
    }
}

pub fn apply_profile_update(user: &mut User, patch: UpdateProfileRequest) -> DomainResult<()> {
    patch.validate()?;

    if let Some(name) = patch.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "Name must be 1-100 characters"));
        }
        user.name = name.to_string();
    }
    if let Some(email) = patch.email {
        user.email = email.trim().to_string();
    }
    if let Some(avatar) = patch.avatar {
        user.avatar = avatar;
    }
    if let Some(theme) = patch.theme {
        user.theme = theme;
    }
    Ok(())
}

pub fn set_notifications(user: &mut User, input: NotificationSettingsRequest) -> DomainResult<()> {
    if let Some(time) = input.reminder_time {
        let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
            .map_err(|_| DomainError::validation("reminder_time", "must be in HH:MM format"))?;
        user.reminder_time = parsed.format("%H:%M").to_string();
    }
    user.reminders_enabled = input.reminders_enabled;
    Ok(())
}

/// Up to two initials from the first letters of the name's words.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

pub fn admin_overview(users: &[User], workouts: &[Workout], today: NaiveDate) -> AdminOverview {
    AdminOverview {
        users: users.len(),
        workouts: workouts.len(),
        workouts_today: workouts.iter().filter(|w| w.date == today).count(),
    }
}
