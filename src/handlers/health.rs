use serde_json::{json, Value};

use crate::AppState;

pub fn health_check() -> Value {
    json!({
        "status": "ok",
        "service": "fitforge",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness: the store must be open. Returns the status code a readiness
/// endpoint would answer with alongside the body.
pub async fn readyz(state: &AppState) -> (u16, Value) {
    let store_ok = !state.store.is_closed();
    let users = state.store.read(|data| data.users.len()).await;

    if store_ok {
        (
            200,
            json!({
                "status": "ready",
                "checks": { "store": "ok", "backend": state.store.describe(), "users": users },
            }),
        )
    } else {
        (
            503,
            json!({
                "status": "not_ready",
                "checks": { "store": "closed", "backend": state.store.describe() },
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_state;

    #[test]
    fn test_health_names_service() {
        let body = health_check();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "fitforge");
    }

    #[tokio::test]
    async fn test_ready_until_closed() {
        let state = test_state().await;
        let (code, body) = readyz(&state).await;
        assert_eq!(code, 200);
        assert_eq!(body["checks"]["store"], "ok");

        state.store.close().await.unwrap();
        let (code, body) = readyz(&state).await;
        assert_eq!(code, 503);
        assert_eq!(body["status"], "not_ready");
    }
}
