mod book_service;
mod errors;
mod queries;

pub use book_service::{
    ServiceDependencies, change_status, create_book, delete_book, reset_books, toggle_favorite,
    update_book,
};
pub use errors::{BookApplicationError, Result};
pub use queries::{
    BookPage, BookStats, ListCriteria, SortKey, get_book, list_books, parse_positive,
    parse_positive_or, recommend_book, search_books, stats,
};
