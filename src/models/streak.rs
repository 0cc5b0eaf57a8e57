use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One per user. `longest_streak >= current_streak` after every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakRecord {
    pub user_id: Uuid,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_workout_date: Option<NaiveDate>,
}

impl StreakRecord {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            current_streak: 0,
            longest_streak: 0,
            last_workout_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StreakStatus {
    pub logged_today: bool,
    /// Logged yesterday but not yet today.
    pub at_risk: bool,
    /// Current streak as of `today`; 0 once a day has been missed.
    pub effective_current: u32,
}

#[derive(Debug, Serialize)]
pub struct StreakInfo {
    #[serde(flatten)]
    pub record: StreakRecord,
    #[serde(flatten)]
    pub status: StreakStatus,
}
