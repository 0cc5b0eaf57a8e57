use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::Dataset;
use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, ChangeKind};
use crate::models::goal::{CreateGoalRequest, GoalCategory, UpdateGoalRequest};
use crate::models::workout::{CreateWorkoutRequest, Difficulty};
use crate::services::goals::GoalStore;
use crate::services::workouts::{self, WorkoutLog};
use crate::services::{streak, users};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DemoSeed {
    pub user_id: Uuid,
    /// False when the guest account already existed and nothing was written.
    pub created: bool,
}

// ── Guest account ────────────────────────────────────────────────────────────

/// Creates the guest account with a week of sample activity. Safe to call on
/// every startup: an existing account (matched by `DEMO_EMAIL`) is left as is.
pub async fn seed_demo(state: &AppState, today: NaiveDate, now: DateTime<Utc>) -> AppResult<DemoSeed> {
    let email = state.config.demo_email.clone();

    let seed = state
        .store
        .write(|data| {
            if let Some(existing) = data
                .users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(&email))
            {
                return Ok::<_, AppError>(DemoSeed {
                    user_id: existing.id,
                    created: false,
                });
            }

            let user_id = Uuid::new_v4();
            data.users.push(users::guest_profile(user_id, &email, now));
            seed_demo_data(data, user_id, today, now)?;
            Ok(DemoSeed {
                user_id,
                created: true,
            })
        })
        .await?;

    if seed.created {
        tracing::info!(user_id = %seed.user_id, email = %email, "Demo account seeded");
        state.publish(ChangeEvent::new(ChangeKind::ProfileChanged, seed.user_id, None));
    } else {
        tracing::debug!(user_id = %seed.user_id, "Demo account already present");
    }
    Ok(seed)
}

// ── Demo Data Seeding ────────────────────────────────────────────────────────

fn seed_demo_data(
    data: &mut Dataset,
    user_id: Uuid,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> AppResult<()> {
    // ── Workouts over the past week (a rest day on day 3) ────────────────
    let sessions = [
        (0, "Morning Run", "Running", 30, Difficulty::Medium, 320),
        (1, "Upper Body", "Strength", 45, Difficulty::Hard, 280),
        (2, "Tabata", "HIIT", 20, Difficulty::Intense, 250),
        (4, "Hill Ride", "Cycling", 60, Difficulty::Medium, 540),
        (5, "Leg Day", "Strength", 50, Difficulty::Hard, 310),
        (6, "Easy Jog", "Running", 25, Difficulty::Easy, 210),
    ];

    let mut log = WorkoutLog::new(&mut data.workouts);
    for (days_ago, name, kind, duration, difficulty, calories) in sessions {
        log.create(
            user_id,
            CreateWorkoutRequest {
                name: name.into(),
                workout_type: Some(kind.into()),
                duration: Some(duration),
                difficulty: Some(difficulty),
                calories: Some(calories),
                notes: None,
                date: today - Duration::days(days_ago),
            },
        )?;
    }
    let dates = workouts::dates_for_user(&data.workouts, user_id);

    // ── Goals (one already reached) ──────────────────────────────────────
    let mut goals = GoalStore::new(&mut data.goals);
    goals.create(
        user_id,
        CreateGoalRequest {
            title: "Run a 10k".into(),
            description: Some("Build up to 10k without walking breaks".into()),
            target_value: Some("10 km".into()),
            category: Some(GoalCategory::Endurance),
        },
        now,
    )?;
    let done = goals.create(
        user_id,
        CreateGoalRequest {
            title: "Work out 3 times a week".into(),
            category: Some(GoalCategory::Cardio),
            ..Default::default()
        },
        now,
    )?;
    goals.update(
        done.id,
        UpdateGoalRequest {
            is_completed: Some(true),
            ..Default::default()
        },
    )?;

    // Streak from the seeded dates
    data.streaks.retain(|s| s.user_id != user_id);
    data.streaks.push(streak::rebuild(user_id, &dates, today));
    Ok(())
}
