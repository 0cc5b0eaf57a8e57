//! Workout log rules and the month calendar grid.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::workout::{
    CalendarDay, CalendarMonth, CreateWorkoutRequest, UpdateWorkoutRequest, Workout,
    DEFAULT_DURATION_MINUTES, DEFAULT_WORKOUT_TYPE,
};

pub struct WorkoutLog<'a> {
    workouts: &'a mut Vec<Workout>,
}

impl<'a> WorkoutLog<'a> {
    pub fn new(workouts: &'a mut Vec<Workout>) -> Self {
        Self { workouts }
    }

    pub fn create(&mut self, user_id: Uuid, input: CreateWorkoutRequest) -> DomainResult<Workout> {
        input.validate()?;
        let name = required_name(&input.name)?;

        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            name,
            workout_type: input
                .workout_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_WORKOUT_TYPE.to_string()),
            duration: input.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
            difficulty: input.difficulty.unwrap_or_default(),
            calories: input.calories.unwrap_or(0),
            notes: input.notes.filter(|n| !n.trim().is_empty()),
            date: input.date,
        };
        self.workouts.push(workout.clone());
        Ok(workout)
    }

    pub fn update(&mut self, id: Uuid, patch: UpdateWorkoutRequest) -> DomainResult<Workout> {
        patch.validate()?;
        let name = patch.name.as_deref().map(required_name).transpose()?;

        let workout = self.get_mut(id)?;
        if let Some(name) = name {
            workout.name = name;
        }
        if let Some(kind) = patch.workout_type.map(|t| t.trim().to_string()) {
            if !kind.is_empty() {
                workout.workout_type = kind;
            }
        }
        if let Some(duration) = patch.duration {
            workout.duration = duration;
        }
        if let Some(difficulty) = patch.difficulty {
            workout.difficulty = difficulty;
        }
        if let Some(calories) = patch.calories {
            workout.calories = calories;
        }
        if let Some(notes) = patch.notes {
            workout.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        if let Some(date) = patch.date {
            workout.date = date;
        }
        Ok(workout.clone())
    }

    /// Move a workout to another day.
    pub fn reschedule(&mut self, id: Uuid, date: NaiveDate) -> DomainResult<Workout> {
        let workout = self.get_mut(id)?;
        workout.date = date;
        Ok(workout.clone())
    }

    /// Idempotent. Returns whether a workout was actually removed.
    pub fn delete(&mut self, id: Uuid) -> DomainResult<bool> {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        Ok(self.workouts.len() != before)
    }

    fn get_mut(&mut self, id: Uuid) -> DomainResult<&mut Workout> {
        self.workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| DomainError::not_found("Workout", id))
    }
}

/// A workout owned by someone else reads as not found.
pub fn find_owned(workouts: &[Workout], user_id: Uuid, id: Uuid) -> DomainResult<&Workout> {
    workouts
        .iter()
        .find(|w| w.id == id && w.user_id == user_id)
        .ok_or_else(|| DomainError::not_found("Workout", id))
}

/// Most recent date first, newest insert first within a day.
pub fn list_for_user(workouts: &[Workout], user_id: Uuid) -> Vec<Workout> {
    let mut owned: Vec<Workout> = workouts
        .iter()
        .rev()
        .filter(|w| w.user_id == user_id)
        .cloned()
        .collect();
    owned.sort_by(|a, b| b.date.cmp(&a.date));
    owned
}

pub fn on_date(workouts: &[Workout], user_id: Uuid, date: NaiveDate) -> Vec<Workout> {
    workouts
        .iter()
        .filter(|w| w.user_id == user_id && w.date == date)
        .cloned()
        .collect()
}

pub fn dates_for_user(workouts: &[Workout], user_id: Uuid) -> Vec<NaiveDate> {
    workouts
        .iter()
        .filter(|w| w.user_id == user_id)
        .map(|w| w.date)
        .collect()
}

pub fn month_calendar(
    workouts: &[Workout],
    user_id: Uuid,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> DomainResult<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::validation("month", format!("{}-{} is not a valid month", year, month)))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| DomainError::validation("month", "out of supported range"))?;

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<CalendarDay>> = (0..leading).map(|_| None).collect();

    for date in first.iter_days().take_while(|d| *d < next_first) {
        cells.push(Some(CalendarDay {
            date,
            is_today: date == today,
            workouts: on_date(workouts, user_id, date),
        }));
    }

    Ok(CalendarMonth { year, month, cells })
}

fn required_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name", "Workout name is required"));
    }
    Ok(name.to_string())
}
