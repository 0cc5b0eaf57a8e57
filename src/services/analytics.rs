//! Workout aggregation over an inclusive date window.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::goal::GoalProgress;
use crate::models::workout::Workout;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub count: u64,
    /// Minutes.
    pub total_duration: u64,
    pub total_calories: u64,
    /// Total minutes per weekday, index 0 = Sunday .. 6 = Saturday.
    pub by_weekday: [u64; 7],
    /// Number of workouts per type.
    pub by_type: BTreeMap<String, u64>,
}

impl Summary {
    /// Weekday with the most minutes; ties go to the earlier day.
    pub fn busiest_weekday(&self) -> Option<&'static str> {
        let (day, minutes) = self
            .by_weekday
            .iter()
            .enumerate()
            .fold((0, 0), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
        (minutes > 0).then(|| WEEKDAY_LABELS[day])
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsRange {
    #[default]
    Week,
    Month,
    Year,
}

impl AnalyticsRange {
    /// Inclusive window ending on `today`.
    pub fn window(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            AnalyticsRange::Week => today - Duration::days(7),
            AnalyticsRange::Month => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
            AnalyticsRange::Year => today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        };
        (start, today)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub calories: u32,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub range: AnalyticsRange,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub summary: Summary,
    pub goals: GoalProgress,
}

fn in_window(w: &Workout, start: NaiveDate, end: NaiveDate) -> bool {
    w.date >= start && w.date <= end
}

pub fn summarize(records: &[Workout], window_start: NaiveDate, window_end: NaiveDate) -> Summary {
    records
        .iter()
        .filter(|w| in_window(w, window_start, window_end))
        .fold(Summary::default(), |mut s, w| {
            s.count += 1;
            s.total_duration += u64::from(w.duration);
            s.total_calories += u64::from(w.calories);
            s.by_weekday[w.date.weekday().num_days_from_sunday() as usize] += u64::from(w.duration);
            *s.by_type.entry(w.workout_type.clone()).or_insert(0) += 1;
            s
        })
}

/// Calories per workout in the window, oldest first.
pub fn calorie_trend(records: &[Workout], window_start: NaiveDate, window_end: NaiveDate) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .filter(|w| in_window(w, window_start, window_end))
        .map(|w| TrendPoint {
            date: w.date,
            calories: w.calories,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

pub fn to_csv(records: &[Workout], window_start: NaiveDate, window_end: NaiveDate) -> String {
    let mut out = String::from("Date,Type,Duration,Calories\n");
    for w in records.iter().filter(|w| in_window(w, window_start, window_end)) {
        out.push_str(&format!(
            "{},{},{},{}\n",
            w.date,
            csv_field(&w.workout_type),
            w.duration,
            w.calories
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
