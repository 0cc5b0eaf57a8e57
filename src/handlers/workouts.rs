use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, ChangeKind};
use crate::models::workout::{CalendarMonth, CreateWorkoutRequest, UpdateWorkoutRequest, Workout};
use crate::services::workouts::{self, month_calendar, WorkoutLog};
use crate::AppState;

pub async fn log_workout(
    state: &AppState,
    user_id: Uuid,
    body: CreateWorkoutRequest,
) -> AppResult<Workout> {
    let workout = state
        .store
        .write(|data| {
            super::user(data, user_id)?;
            WorkoutLog::new(&mut data.workouts)
                .create(user_id, body)
                .map_err(AppError::from)
        })
        .await?;

    tracing::debug!(
        user_id = %user_id,
        workout_id = %workout.id,
        date = %workout.date,
        "Workout logged"
    );
    state.publish(ChangeEvent::new(ChangeKind::WorkoutChanged, user_id, Some(workout.id)));
    Ok(workout)
}

pub async fn list_workouts(state: &AppState, user_id: Uuid) -> AppResult<Vec<Workout>> {
    Ok(state
        .store
        .read(|data| workouts::list_for_user(&data.workouts, user_id))
        .await)
}

pub async fn get_workout(state: &AppState, user_id: Uuid, workout_id: Uuid) -> AppResult<Workout> {
    let workout = state
        .store
        .read(|data| workouts::find_owned(&data.workouts, user_id, workout_id).cloned())
        .await?;
    Ok(workout)
}

pub async fn update_workout(
    state: &AppState,
    user_id: Uuid,
    workout_id: Uuid,
    body: UpdateWorkoutRequest,
) -> AppResult<Workout> {
    let workout = state
        .store
        .write(|data| {
            workouts::find_owned(&data.workouts, user_id, workout_id)?;
            WorkoutLog::new(&mut data.workouts).update(workout_id, body)
        })
        .await?;

    state.publish(ChangeEvent::new(ChangeKind::WorkoutChanged, user_id, Some(workout_id)));
    Ok(workout)
}

/// Calendar drag-and-drop: move a workout to `date`.
pub async fn reschedule_workout(
    state: &AppState,
    user_id: Uuid,
    workout_id: Uuid,
    date: NaiveDate,
) -> AppResult<Workout> {
    let workout = state
        .store
        .write(|data| {
            workouts::find_owned(&data.workouts, user_id, workout_id)?;
            WorkoutLog::new(&mut data.workouts).reschedule(workout_id, date)
        })
        .await?;

    state.publish(ChangeEvent::new(ChangeKind::WorkoutChanged, user_id, Some(workout_id)));
    Ok(workout)
}

pub async fn delete_workout(state: &AppState, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
    let deleted = state
        .store
        .write(|data| {
            if workouts::find_owned(&data.workouts, user_id, workout_id).is_err() {
                return Ok(false);
            }
            WorkoutLog::new(&mut data.workouts).delete(workout_id)
        })
        .await?;

    if deleted {
        state.publish(ChangeEvent::new(ChangeKind::WorkoutDeleted, user_id, Some(workout_id)));
    }
    Ok(deleted)
}

pub async fn workouts_on(state: &AppState, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<Workout>> {
    Ok(state
        .store
        .read(|data| workouts::on_date(&data.workouts, user_id, date))
        .await)
}

pub async fn calendar(
    state: &AppState,
    user_id: Uuid,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> AppResult<CalendarMonth> {
    let grid = state
        .store
        .read(|data| month_calendar(&data.workouts, user_id, year, month, today))
        .await?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, signup, test_state};

    fn request(name: &str, on: NaiveDate, duration: u32) -> CreateWorkoutRequest {
        CreateWorkoutRequest {
            name: name.into(),
            workout_type: None,
            duration: Some(duration),
            difficulty: None,
            calories: Some(duration * 10),
            notes: None,
            date: on,
        }
    }

    #[tokio::test]
    async fn test_log_and_list_newest_first() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;

        log_workout(&state, me, request("Old", date(2024, 3, 1), 20)).await.unwrap();
        log_workout(&state, me, request("New", date(2024, 3, 4), 30)).await.unwrap();

        let names: Vec<String> = list_workouts(&state, me)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[tokio::test]
    async fn test_log_is_broadcast_to_owner() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;
        let mut rx = state.subscribe().unwrap();

        let w = log_workout(&state, me, request("Run", date(2024, 3, 4), 30)).await.unwrap();
        let event = crate::events::next_for_user(&mut rx, me).await.unwrap();
        assert_eq!(event.kind, ChangeKind::WorkoutChanged);
        assert_eq!(event.entity_id, Some(w.id));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;
        let err = log_workout(&state, me, request("   ", date(2024, 3, 4), 30))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[tokio::test]
    async fn test_reschedule_moves_calendar_cell() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;
        let w = log_workout(&state, me, request("Swim", date(2024, 3, 4), 45)).await.unwrap();

        reschedule_workout(&state, me, w.id, date(2024, 3, 9)).await.unwrap();

        assert!(workouts_on(&state, me, date(2024, 3, 4)).await.unwrap().is_empty());
        let grid = calendar(&state, me, 2024, 3, date(2024, 3, 9)).await.unwrap();
        let day = grid.day(9).unwrap();
        assert!(day.is_today);
        assert_eq!(day.workouts.len(), 1);
    }

    #[tokio::test]
    async fn test_foreign_workout_is_not_found() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;
        let them = signup(&state, "them@example.com").await;
        let theirs = log_workout(&state, them, request("Lift", date(2024, 3, 4), 40))
            .await
            .unwrap();

        assert_eq!(get_workout(&state, me, theirs.id).await.unwrap_err().status_code(), 404);
        let err = update_workout(&state, me, theirs.id, UpdateWorkoutRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(!delete_workout(&state, me, theirs.id).await.unwrap());
        assert!(delete_workout(&state, them, theirs.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_calendar_month() {
        let state = test_state().await;
        let me = signup(&state, "me@example.com").await;
        let err = calendar(&state, me, 2024, 13, date(2024, 3, 4)).await.unwrap_err();
        assert_eq!(err.status_code(), 422);
    }
}
