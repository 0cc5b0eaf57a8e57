use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use super::{Backend, Dataset};
use crate::error::{AppError, AppResult};

/// The application's data, opened once at startup and shared behind an `Arc`.
///
/// Every mutation runs under the write lock against a working copy; the copy
/// replaces the live dataset only after the backend has persisted it. The lock
/// is held across the whole read-modify-write-persist sequence, so concurrent
/// writers (two streak logs for the same user, say) are serialized.
pub struct Store {
    data: RwLock<Dataset>,
    backend: Box<dyn Backend>,
    closed: AtomicBool,
}

impl Store {
    pub async fn open(backend: Box<dyn Backend>) -> AppResult<Self> {
        let data = backend.load().await?;
        tracing::info!(
            backend = %backend.describe(),
            users = data.users.len(),
            goals = data.goals.len(),
            workouts = data.workouts.len(),
            "Store opened"
        );
        Ok(Self {
            data: RwLock::new(data),
            backend,
            closed: AtomicBool::new(false),
        })
    }

    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Dataset) -> R,
    {
        let data = self.data.read().await;
        f(&data)
    }

    pub async fn write<R, E, F>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Dataset) -> Result<R, E>,
        AppError: From<E>,
    {
        self.ensure_open()?;
        let mut data = self.data.write().await;
        // close() may have flushed while this writer was queued
        self.ensure_open()?;

        let mut working = data.clone();
        let result = f(&mut working)?;
        if working == *data {
            return Ok(result);
        }

        self.backend.save(&working).await?;
        *data = working;
        Ok(result)
    }

    pub async fn flush(&self) -> AppResult<()> {
        let data = self.data.read().await;
        self.backend.save(&data).await
    }

    /// Flush and refuse further writes.
    pub async fn close(&self) -> AppResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.flush().await?;
        tracing::info!(backend = %self.backend.describe(), "Store closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.is_closed() {
            return Err(AppError::Storage("store is closed".into()));
        }
        Ok(())
    }
}
