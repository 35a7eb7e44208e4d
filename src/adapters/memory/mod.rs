pub mod book_repository;

// パブリックに型を再エクスポート
pub use book_repository::{BookRepository as InMemoryBookRepository, RepositoryError, seed_books};
