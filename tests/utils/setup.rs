use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use innkeeper::auth::repository::InMemoryUserRepository;
use innkeeper::auth::token::TokenConfig;
use innkeeper::hotel::repository::InMemoryHotelRepository;
use innkeeper::{build_router, AppState};

use super::mocks::MockMediaStore;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// Signing secret shared by every integration-test app, so tests can mint
/// their own tokens (e.g. expired ones) that the app will accept as signed
pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub user_repository: Arc<InMemoryUserRepository>,
    pub hotel_repository: Arc<InMemoryHotelRepository>,
    pub media_store: Arc<MockMediaStore>,
    pub token_config: TokenConfig,
}

pub struct TestAppBuilder {
    failing_media: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            failing_media: false,
        }
    }

    /// Every image batch submitted through the app will fail
    #[allow(dead_code)]
    pub fn with_failing_media(mut self) -> Self {
        self.failing_media = true;
        self
    }

    pub fn build(self) -> TestApp {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let hotel_repository = Arc::new(InMemoryHotelRepository::new());
        let media_store = Arc::new(if self.failing_media {
            MockMediaStore::failing()
        } else {
            MockMediaStore::new()
        });
        let token_config = TokenConfig::with_settings(TEST_SECRET, 24, false);

        let state = AppState::new(
            user_repository.clone(),
            hotel_repository.clone(),
            media_store.clone(),
            token_config.clone(),
        );

        TestApp {
            router: build_router(state),
            user_repository,
            hotel_repository,
            media_store,
            token_config,
        }
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Registers a user and returns (user_id, session cookie pair)
    pub async fn register(&self, email: &str, password: &str) -> (String, String) {
        let body = format!(
            r#"{{"email":"{email}","password":"{password}","firstName":"Test","lastName":"User"}}"#
        );
        let response = self.post_json("/api/users/register", &body).await;
        assert_eq!(response.status().as_u16(), 201, "registration failed");

        let cookie = session_cookie(&response).expect("registration set no cookie");
        let json = json_body(response).await;
        (json["userId"].as_str().unwrap().to_string(), cookie)
    }
}

/// Extracts the `auth_token=...` pair from a Set-Cookie header, ready to be
/// echoed back in a Cookie header
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or_default().to_string())
        .filter(|pair| pair.starts_with("auth_token="))
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
