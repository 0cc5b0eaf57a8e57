//! Change notifications pushed to subscribers after a successful write.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    ProfileChanged,
    UserDeleted,
    GoalChanged,
    GoalDeleted,
    WorkoutChanged,
    WorkoutDeleted,
    StreakChanged,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Uuid>,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, user_id: Uuid, entity_id: Option<Uuid>) -> Self {
        Self {
            kind,
            user_id,
            entity_id,
        }
    }

    pub fn concerns(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Fire-and-forget publish; having no subscribers is not an error.
pub fn publish(tx: Option<&broadcast::Sender<ChangeEvent>>, event: ChangeEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}

/// Waits for the next event addressed to `user_id`, skipping everyone else's.
///
/// Returns `None` once the channel is closed. Lagged receivers skip ahead.
pub async fn next_for_user(
    rx: &mut broadcast::Receiver<ChangeEvent>,
    user_id: Uuid,
) -> Option<ChangeEvent> {
    loop {
        match rx.recv().await {
            Ok(event) if event.concerns(user_id) => return Some(event),
            Ok(_) => continue,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(user_id = %user_id, skipped, "Change subscriber lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
