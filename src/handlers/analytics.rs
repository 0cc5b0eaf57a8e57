use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::Dataset;
use crate::error::{AppError, AppResult};
use crate::models::goal::GoalProgress;
use crate::models::workout::Workout;
use crate::services::analytics::{self, AnalyticsRange, Report, Summary, TrendPoint};
use crate::services::goals;
use crate::AppState;

fn owned_workouts(data: &Dataset, user_id: Uuid) -> Vec<Workout> {
    data.workouts
        .iter()
        .filter(|w| w.user_id == user_id)
        .cloned()
        .collect()
}

pub async fn summary(
    state: &AppState,
    user_id: Uuid,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> AppResult<Summary> {
    state
        .store
        .read(|data| {
            super::user(data, user_id)?;
            let workouts = owned_workouts(data, user_id);
            Ok::<_, AppError>(analytics::summarize(&workouts, window_start, window_end))
        })
        .await
}

/// The analytics screen: totals for `range` ending on `today` plus goal progress.
pub async fn report(
    state: &AppState,
    user_id: Uuid,
    range: AnalyticsRange,
    today: NaiveDate,
) -> AppResult<Report> {
    let (window_start, window_end) = range.window(today);
    let (summary, goals) = state
        .store
        .read(|data| {
            super::user(data, user_id)?;
            let workouts = owned_workouts(data, user_id);
            let goals: GoalProgress = goals::progress(&data.goals, user_id);
            Ok::<_, AppError>((
                analytics::summarize(&workouts, window_start, window_end),
                goals,
            ))
        })
        .await?;

    tracing::debug!(
        user_id = %user_id,
        range = ?range,
        count = summary.count,
        "Analytics report built"
    );
    Ok(Report {
        range,
        window_start,
        window_end,
        summary,
        goals,
    })
}

pub async fn calorie_trend(
    state: &AppState,
    user_id: Uuid,
    range: AnalyticsRange,
    today: NaiveDate,
) -> AppResult<Vec<TrendPoint>> {
    let (window_start, window_end) = range.window(today);
    state
        .store
        .read(|data| {
            super::user(data, user_id)?;
            let workouts = owned_workouts(data, user_id);
            Ok::<_, AppError>(analytics::calorie_trend(&workouts, window_start, window_end))
        })
        .await
}

/// CSV download of the workouts in `range`.
pub async fn export_csv(
    state: &AppState,
    user_id: Uuid,
    range: AnalyticsRange,
    today: NaiveDate,
) -> AppResult<String> {
    let (window_start, window_end) = range.window(today);
    state
        .store
        .read(|data| {
            super::user(data, user_id)?;
            let workouts = owned_workouts(data, user_id);
            Ok::<_, AppError>(analytics::to_csv(&workouts, window_start, window_end))
        })
        .await
}
