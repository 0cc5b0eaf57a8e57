use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_REMINDER_TIME: &str = "09:00";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Image URL or inline image reference, stored as given.
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_reminder_time")]
    pub reminder_time: String,
    #[serde(default)]
    pub reminders_enabled: bool,
    pub created_at: DateTime<Utc>,
}

fn default_reminder_time() -> String {
    DEFAULT_REMINDER_TIME.to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    HighContrast,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Guest,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub avatar: Option<String>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationSettingsRequest {
    pub reminder_time: Option<String>,
    pub reminders_enabled: bool,
}

/// What the profile screen renders.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub initials: String,
    pub theme: Theme,
    pub role: Role,
    pub reminder_time: String,
    pub reminders_enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        let initials = crate::services::users::initials(&u.name);
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            avatar: u.avatar,
            initials,
            theme: u.theme,
            role: u.role,
            reminder_time: u.reminder_time,
            reminders_enabled: u.reminders_enabled,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminOverview {
    pub users: usize,
    pub workouts: usize,
    pub workouts_today: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Theme::HighContrast).unwrap(),
            "high-contrast"
        );
        let theme: Theme = serde_json::from_str(r#""dark""#).unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn test_legacy_user_without_reminders_deserializes() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Sam",
            "email": "sam@example.com",
            "created_at": "2024-01-15T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.theme, Theme::Light);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.reminder_time, "09:00");
        assert!(!user.reminders_enabled);
        assert!(user.avatar.is_empty());
    }

    #[test]
    fn test_profile_carries_initials() {
        let user = User {
            id: Uuid::nil(),
            name: "john doe".into(),
            email: "john@example.com".into(),
            avatar: String::new(),
            theme: Theme::Dark,
            role: Role::Admin,
            reminder_time: DEFAULT_REMINDER_TIME.into(),
            reminders_enabled: false,
            created_at: Utc::now(),
        };
        let profile = UserProfile::from(user);
        assert_eq!(profile.initials, "JD");
        assert_eq!(profile.role, Role::Admin);
    }
}
