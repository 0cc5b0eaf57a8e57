use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<String>,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GoalCategory {
    Strength,
    Cardio,
    Flexibility,
    #[serde(alias = "Weight Loss")]
    WeightLoss,
    Endurance,
    #[default]
    #[serde(other)]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Strength,
        GoalCategory::Cardio,
        GoalCategory::Flexibility,
        GoalCategory::WeightLoss,
        GoalCategory::Endurance,
        GoalCategory::Other,
    ];

    /// Display label as shown in the goal form.
    pub fn label(self) -> &'static str {
        match self {
            GoalCategory::Strength => "Strength",
            GoalCategory::Cardio => "Cardio",
            GoalCategory::Flexibility => "Flexibility",
            GoalCategory::WeightLoss => "Weight Loss",
            GoalCategory::Endurance => "Endurance",
            GoalCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<String>,
    pub category: Option<GoalCategory>,
}

/// Partial update. `id`, `user_id` and `created_at` are not patchable.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<String>,
    pub category: Option<GoalCategory>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct GoalProgress {
    pub completed: usize,
    pub total: usize,
}
