use chrono::Utc;

use fitforge::config::Config;
use fitforge::handlers;
use fitforge::services::analytics::AnalyticsRange;
use fitforge::services::streak::today_utc;
use fitforge::{db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitforge=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        backend = ?config.store_backend,
        data_file = %config.data_file.display(),
        seed_demo = config.seed_demo,
        "Configuration loaded"
    );

    let store = db::open_store(&config).await?;
    let state = AppState::new(store, config);

    let (_, ready) = handlers::health::readyz(&state).await;
    tracing::info!(health = %handlers::health::health_check(), ready = %ready, "Startup checks");

    if state.config.seed_demo {
        let today = today_utc();
        let seed = handlers::demo::seed_demo(&state, today, Utc::now()).await?;
        log_dashboard(&state, seed.user_id, today).await?;
    }

    state.store.close().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Logs what the dashboard would show for `user_id`.
async fn log_dashboard(
    state: &AppState,
    user_id: uuid::Uuid,
    today: chrono::NaiveDate,
) -> anyhow::Result<()> {
    let profile = handlers::users::get_profile(state, user_id).await?;
    let streak = handlers::streak::get_streak(state, user_id, today).await?;
    let goals = handlers::goals::goal_progress(state, user_id).await?;
    let report = handlers::analytics::report(state, user_id, AnalyticsRange::Week, today).await?;

    tracing::info!(
        user = %profile.name,
        current_streak = streak.status.effective_current,
        longest_streak = streak.record.longest_streak,
        goals_completed = goals.completed,
        goals_total = goals.total,
        workouts_this_week = report.summary.count,
        minutes_this_week = report.summary.total_duration,
        calories_this_week = report.summary.total_calories,
        busiest_day = report.summary.busiest_weekday().unwrap_or("-"),
        "Dashboard"
    );
    Ok(())
}
