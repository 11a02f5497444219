//! # HTTP Journey Tests
//!
//! Drives `GatewayService::router()` (tracing and timeout layers included)
//! over a real `ProgressService`, checking that what the HTTP surface
//! reports matches what the engine persisted.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ath_01_catalog::default_catalog;
    use ath_02_progress::{
        EngineConfig, FixedSeedSource, InMemoryDocumentStore, MockTimeSource, ProgressApi,
        ProgressService,
    };
    use ath_03_api_gateway::{GatewayConfig, GatewayService};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use shared_types::{Currency, PlayerId};
    use tower::ServiceExt;

    const IDENTITY: &str = "x-forwarded-user";

    struct Stack {
        router: Router,
        engine: Arc<ProgressService<InMemoryDocumentStore>>,
        clock: Arc<MockTimeSource>,
    }

    fn stack() -> Stack {
        let clock = Arc::new(MockTimeSource::new(1_000));
        let engine = Arc::new(
            ProgressService::new(
                Arc::new(InMemoryDocumentStore::new()),
                Arc::new(default_catalog().unwrap()),
                EngineConfig::default(),
            )
            .with_time_source(clock.clone())
            .with_seed_source(Arc::new(FixedSeedSource::new(11))),
        );
        let config = GatewayConfig {
            identity_header: IDENTITY.to_string(),
            ..GatewayConfig::default()
        };
        let router = GatewayService::new(config, engine.clone())
            .unwrap()
            .router()
            .unwrap();
        Stack {
            router,
            engine,
            clock,
        }
    }

    async fn send(stack: &Stack, method: &str, uri: &str, player: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(IDENTITY, player)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = stack.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn get(stack: &Stack, uri: &str, player: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(IDENTITY, player)
            .body(Body::empty())
            .unwrap();
        let response = stack.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_player_journey_over_http() {
        let stack = stack();

        let (status, progress) = get(&stack, "/progress", "boethius").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(progress["currencies"]["scrolls"], 100);

        let (status, _) = send(&stack, "POST", "/chests/award", "boethius", json!({"chestType": "Tomo"})).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&stack, "POST", "/chests/unlock", "boethius", json!({"slotIndex": 0})).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&stack, "POST", "/chests/open", "boethius", json!({"slotIndex": 0})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("not ready"));

        stack.clock.advance(10_800);
        let (status, opened) = send(&stack, "POST", "/chests/open", "boethius", json!({"slotIndex": 0})).await;
        assert_eq!(status, StatusCode::OK);
        let scrolls = opened["rewards"]["scrolls"].as_u64().unwrap();
        assert!((50..=199).contains(&scrolls));

        let (_, progress) = get(&stack, "/progress", "boethius").await;
        assert_eq!(progress["currencies"]["scrolls"].as_u64().unwrap(), 100 + scrolls);
        assert!(progress["chestSlots"][0].is_null());
    }

    #[tokio::test]
    async fn test_http_donation_matches_engine_state() {
        let stack = stack();
        get(&stack, "/progress", "abelard").await;
        get(&stack, "/progress", "heloise").await;

        let (status, _) = send(
            &stack,
            "POST",
            "/social/donate",
            "abelard",
            json!({"targetUserId": "heloise", "type": "currency", "currency": "scrolls", "amount": 40}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &stack,
            "POST",
            "/social/donate",
            "abelard",
            json!({"targetUserId": "heloise", "type": "currency", "currency": "scrolls", "amount": 61}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Insufficient"));

        let sender = stack
            .engine
            .get_progress(&PlayerId::new("abelard").unwrap())
            .await
            .unwrap()
            .unwrap();
        let receiver = stack
            .engine
            .get_progress(&PlayerId::new("heloise").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sender.balance(Currency::Scrolls), 60);
        assert_eq!(receiver.balance(Currency::Scrolls), 140);
    }

    #[tokio::test]
    async fn test_guild_flow_over_http() {
        let stack = stack();
        get(&stack, "/progress", "plotinus").await;
        get(&stack, "/progress", "porphyry").await;

        let (status, guild) = send(
            &stack,
            "POST",
            "/guilds",
            "plotinus",
            json!({"name": "  The One  ", "description": "Emanation studies"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(guild["name"], "The One");
        let guild_id = guild["id"].as_str().unwrap().to_string();

        let (status, joined) = send(&stack, "POST", &format!("/guilds/{guild_id}/join"), "porphyry", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(joined["members"].as_array().unwrap().len(), 2);

        let (status, body) = send(&stack, "POST", "/guilds", "porphyry", json!({"name": "Schism"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("already belongs"));

        let (status, fetched) = get(&stack, &format!("/guilds/{guild_id}"), "porphyry").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, joined);
    }

    #[tokio::test]
    async fn test_default_identity_header_is_ignored_when_reconfigured() {
        let stack = stack();
        let request = Request::builder()
            .uri("/progress")
            .header("x-player-id", "anonymous")
            .body(Body::empty())
            .unwrap();
        let response = stack.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
