use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_WORKOUT_TYPE: &str = "Strength";
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub calories: u32,
    pub notes: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Intense,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub calories: Option<u32>,
    pub notes: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub calories: Option<u32>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub workouts: Vec<Workout>,
}

/// A month laid out Sunday-first. Leading `None` cells pad the first week.
#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<CalendarDay>>,
}

impl CalendarMonth {
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.cells
            .iter()
            .flatten()
            .find(|d| chrono::Datelike::day(&d.date) == day)
    }
}
