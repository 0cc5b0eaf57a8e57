use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Backend, Dataset};
use crate::error::AppResult;

/// Keeps the last saved snapshot in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    snapshot: Mutex<Dataset>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Dataset) -> Self {
        Self {
            snapshot: Mutex::new(data),
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn load(&self) -> AppResult<Dataset> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, data: &Dataset) -> AppResult<()> {
        *self.snapshot.lock().await = data.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
