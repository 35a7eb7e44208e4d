use book_store::{
    adapters::memory::InMemoryBookRepository,
    api::{handlers::AppState, router::create_router},
    application::book::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_store=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Initialize adapters (seeded with two books)
    let book_repository = Arc::new(InMemoryBookRepository::seeded(chrono::Utc::now()));

    // Create service dependencies
    let service_deps = ServiceDependencies { book_repository };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Book API listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
