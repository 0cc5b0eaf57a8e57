//! Workout streak computation.
//!
//! All dates are calendar days in UTC. Callers holding a timestamp truncate it
//! with [`today_utc`] (or `DateTime::date_naive`) before calling in.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::streak::{StreakRecord, StreakStatus};

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Next streak state after a workout is logged on `today`.
///
/// Logging twice on the same day returns the previous record unchanged.
pub fn log_workout(user_id: Uuid, previous: Option<&StreakRecord>, today: NaiveDate) -> StreakRecord {
    let Some(prev) = previous else {
        return StreakRecord {
            user_id,
            current_streak: 1,
            longest_streak: 1,
            last_workout_date: Some(today),
        };
    };

    if prev.last_workout_date == Some(today) {
        return prev.clone();
    }

    let current_streak = match prev.last_workout_date {
        Some(last) if last + Duration::days(1) == today => prev.current_streak.saturating_add(1),
        Some(last) if last > today => {
            tracing::warn!(
                user_id = %prev.user_id,
                last_workout_date = %last,
                today = %today,
                "Last workout date is after the logged date, restarting streak"
            );
            1
        }
        _ => 1,
    };

    StreakRecord {
        user_id: prev.user_id,
        current_streak,
        longest_streak: current_streak.max(prev.longest_streak),
        last_workout_date: Some(today),
    }
}

/// Clears the running streak. The longest streak is kept.
pub fn reset(previous: &StreakRecord) -> StreakRecord {
    StreakRecord {
        user_id: previous.user_id,
        current_streak: 0,
        longest_streak: previous.longest_streak,
        last_workout_date: None,
    }
}

pub fn status(record: &StreakRecord, today: NaiveDate) -> StreakStatus {
    let yesterday = today - Duration::days(1);
    let logged_today = record.last_workout_date == Some(today);
    let at_risk = record.last_workout_date == Some(yesterday);
    let alive = logged_today || at_risk;

    StreakStatus {
        logged_today,
        at_risk,
        effective_current: if alive { record.current_streak } else { 0 },
    }
}

/// Recompute a streak record from the full set of workout dates.
///
/// The current streak is the run of consecutive days ending today, or ending
/// yesterday when nothing is logged today yet. Dates after `today` are ignored.
pub fn rebuild(user_id: Uuid, dates: &[NaiveDate], today: NaiveDate) -> StreakRecord {
    let mut days: Vec<NaiveDate> = dates.iter().copied().filter(|d| *d <= today).collect();
    days.sort();
    days.dedup();

    let Some(&last) = days.last() else {
        return StreakRecord::empty(user_id);
    };

    let mut current_streak = 0u32;
    if last >= today - Duration::days(1) {
        let mut check_date = last;
        for date in days.iter().rev() {
            if *date == check_date {
                current_streak += 1;
                check_date -= Duration::days(1);
            } else {
                break;
            }
        }
    }

    let mut longest_streak = 0u32;
    let mut run = 0u32;
    let mut prev_date: Option<NaiveDate> = None;
    for date in &days {
        run = match prev_date {
            Some(prev) if *date == prev + Duration::days(1) => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        prev_date = Some(*date);
    }

    StreakRecord {
        user_id,
        current_streak,
        longest_streak,
        last_workout_date: Some(last),
    }
}
