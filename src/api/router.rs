use axum::{
    Router,
    routing::{delete, get, patch},
};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, book_stats, create_book, delete_book, get_book, list_books, recommend_book,
    reset_books, search_books, toggle_favorite, update_book, update_status,
};

/// Creates the API router with all book endpoints
///
/// Query endpoints (Read operations):
/// - GET /books - List books (filter, sort, paginate)
/// - GET /books/:id - Get a book
/// - GET /books/search - Search by title or author
/// - GET /books/recommend - Random pick
/// - GET /books/stats - Aggregate counts
///
/// Command endpoints (Write operations):
/// - POST /books - Create a book
/// - PUT /books/:id - Update given fields
/// - PATCH /books/:id/favorite - Toggle favorite
/// - PATCH /books/:id/status - Change reading status
/// - DELETE /books/:id - Delete a book
/// - DELETE /books/reset - Delete all books
///
/// Static segments (search, recommend, stats, reset) win over `:id`.
/// Requests are handled one at a time.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Collection
        .route("/books", get(list_books).post(create_book))
        .route("/books/search", get(search_books))
        .route("/books/recommend", get(recommend_book))
        .route("/books/stats", get(book_stats))
        .route("/books/reset", delete(reset_books))
        // Single book
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/:id/favorite", patch(toggle_favorite))
        .route("/books/:id/status", patch(update_status))
        // Serialize request handling
        .layer(GlobalConcurrencyLimitLayer::new(1))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
