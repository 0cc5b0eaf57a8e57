use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{Config, StoreBackend};
use crate::error::AppResult;
use crate::models::goal::Goal;
use crate::models::streak::StreakRecord;
use crate::models::user::User;
use crate::models::workout::Workout;

mod json_file;
mod memory;
mod store;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use store::Store;

/// Everything the application persists, as one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub streaks: Vec<StreakRecord>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn load(&self) -> AppResult<Dataset>;
    async fn save(&self, data: &Dataset) -> AppResult<()>;
    fn describe(&self) -> String;
}

pub async fn open_store(config: &Config) -> AppResult<Store> {
    let backend: Box<dyn Backend> = match config.store_backend {
        StoreBackend::Json => Box::new(JsonFileBackend::new(&config.data_file)),
        StoreBackend::Memory => Box::new(MemoryBackend::new()),
    };
    Store::open(backend).await
}
