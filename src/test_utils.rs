use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::config::{Config, StoreBackend};
use crate::db::{MemoryBackend, Store};
use crate::models::user::SignupRequest;
use crate::AppState;

pub async fn test_state() -> AppState {
    let config = Config {
        store_backend: StoreBackend::Memory,
        ..Config::default()
    };
    let store = Store::open(Box::new(MemoryBackend::new()))
        .await
        .expect("memory store opens");
    AppState::new(store, config)
}

pub async fn signup(state: &AppState, email: &str) -> Uuid {
    crate::handlers::users::signup(
        state,
        SignupRequest {
            email: email.into(),
            name: Some("Test User".into()),
            avatar: None,
        },
        Utc::now(),
    )
    .await
    .expect("signup succeeds")
    .id
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
