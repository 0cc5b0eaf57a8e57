use std::sync::Arc;

use tokio::sync::broadcast;

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

use config::Config;
use db::Store;
use events::ChangeEvent;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
    pub events_tx: Option<broadcast::Sender<ChangeEvent>>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        let (events_tx, _) = broadcast::channel::<ChangeEvent>(config.event_channel_capacity);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            events_tx: Some(events_tx),
        }
    }

    /// Observer hook for presentation layers that push live updates.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ChangeEvent>> {
        self.events_tx.as_ref().map(|tx| tx.subscribe())
    }

    pub(crate) fn publish(&self, event: ChangeEvent) {
        events::publish(self.events_tx.as_ref(), event);
    }
}
