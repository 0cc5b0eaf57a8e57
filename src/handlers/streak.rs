use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::Dataset;
use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, ChangeKind};
use crate::models::streak::{StreakInfo, StreakRecord};
use crate::services::streak;
use crate::AppState;

fn info(record: StreakRecord, today: NaiveDate) -> StreakInfo {
    let status = streak::status(&record, today);
    StreakInfo { record, status }
}

/// Replace (or insert) the user's single streak record.
fn put(data: &mut Dataset, record: StreakRecord) {
    match data.streaks.iter_mut().find(|s| s.user_id == record.user_id) {
        Some(existing) => *existing = record,
        None => data.streaks.push(record),
    }
}

/// Current streak, creating an empty record on first access.
pub async fn get_streak(state: &AppState, user_id: Uuid, today: NaiveDate) -> AppResult<StreakInfo> {
    let record = state
        .store
        .write(|data| {
            super::user(data, user_id)?;
            if let Some(existing) = data.streaks.iter().find(|s| s.user_id == user_id) {
                return Ok::<_, AppError>(existing.clone());
            }
            let record = StreakRecord::empty(user_id);
            data.streaks.push(record.clone());
            Ok(record)
        })
        .await?;

    Ok(info(record, today))
}

/// Record that the user worked out on `today`. The lookup, the streak rule
/// and the save happen under one store write, so concurrent logs serialize.
pub async fn log_streak(state: &AppState, user_id: Uuid, today: NaiveDate) -> AppResult<StreakInfo> {
    let record = state
        .store
        .write(|data| {
            super::user(data, user_id)?;
            let previous = data.streaks.iter().find(|s| s.user_id == user_id);
            let next = streak::log_workout(user_id, previous, today);
            put(data, next.clone());
            Ok::<_, AppError>(next)
        })
        .await?;

    tracing::info!(
        user_id = %user_id,
        current_streak = record.current_streak,
        longest_streak = record.longest_streak,
        "Streak logged"
    );
    state.publish(ChangeEvent::new(ChangeKind::StreakChanged, user_id, None));
    Ok(info(record, today))
}

pub async fn reset_streak(state: &AppState, user_id: Uuid, today: NaiveDate) -> AppResult<StreakInfo> {
    let record = state
        .store
        .write(|data| {
            super::user(data, user_id)?;
            let next = match data.streaks.iter().find(|s| s.user_id == user_id) {
                Some(previous) => streak::reset(previous),
                None => StreakRecord::empty(user_id),
            };
            put(data, next.clone());
            Ok::<_, AppError>(next)
        })
        .await?;

    tracing::info!(user_id = %user_id, "Streak reset");
    state.publish(ChangeEvent::new(ChangeKind::StreakChanged, user_id, None));
    Ok(info(record, today))
}

/// Recompute the streak from the user's logged workout dates.
pub async fn rebuild_streak(state: &AppState, user_id: Uuid, today: NaiveDate) -> AppResult<StreakInfo> {
    let record = state
        .store
        .write(|data| {
            super::user(data, user_id)?;
            let dates: Vec<NaiveDate> = data
                .workouts
                .iter()
                .filter(|w| w.user_id == user_id)
                .map(|w| w.date)
                .collect();
            let next = streak::rebuild(user_id, &dates, today);
            put(data, next.clone());
            Ok::<_, AppError>(next)
        })
        .await?;

    tracing::debug!(user_id = %user_id, current_streak = record.current_streak, "Streak rebuilt");
    state.publish(ChangeEvent::new(ChangeKind::StreakChanged, user_id, None));
    Ok(info(record, today))
}
