use axum::http::{header, HeaderValue, Method};
use innkeeper::auth::token::TokenConfig;
use innkeeper::auth::repository::InMemoryUserRepository;
use innkeeper::hotel::repository::InMemoryHotelRepository;
use innkeeper::media::{HttpMediaStore, MediaStoreConfig};
use innkeeper::{build_router, AppState};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeeper=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting innkeeper booking API");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let hotel_repository = Arc::new(InMemoryHotelRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    // let hotel_repository = Arc::new(PostgresHotelRepository::new(pool));

    let media_store = Arc::new(HttpMediaStore::new(MediaStoreConfig::new()));
    let token_config = TokenConfig::new();

    let app_state = AppState::new(user_repository, hotel_repository, media_store, token_config);

    let mut app = build_router(app_state);

    // Cookie auth needs credentials, so CORS is pinned to the one frontend origin
    if let Ok(frontend_url) = std::env::var("FRONTEND_URL") {
        let origin = frontend_url
            .parse::<HeaderValue>()
            .expect("FRONTEND_URL must be a valid origin");
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        );
    }

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
