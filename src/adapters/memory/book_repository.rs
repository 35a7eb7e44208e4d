use crate::domain::{self, Book, BookId};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// インメモリリポジトリのエラー
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("book store lock poisoned")]
    LockPoisoned,

    #[error("book {0} already exists")]
    DuplicateId(BookId),

    #[error("book {0} does not exist")]
    Missing(BookId),
}

/// BookRepositoryのインメモリ実装
///
/// プロセス内の`Vec<Book>`を唯一の状態として持つ。
/// プロセス終了とともに失われる。
pub struct BookRepository {
    books: Mutex<Vec<Book>>,
}

impl BookRepository {
    /// 空のリポジトリを作成
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// 指定した書籍で初期化
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
        }
    }

    /// 起動時の初期データ（2冊）で初期化
    pub fn seeded(created_at: DateTime<Utc>) -> Self {
        Self::with_books(seed_books(created_at))
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, Vec<Book>>, RepositoryError> {
        self.books.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// 起動時に投入される書籍
pub fn seed_books(created_at: DateTime<Utc>) -> Vec<Book> {
    vec![
        Book {
            id: BookId::new(1),
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            created_at,
            is_favorite: false,
            status: "unread".to_string(),
        },
        Book {
            id: BookId::new(2),
            title: "The Alchemist".to_string(),
            author: "Paulo Coelho".to_string(),
            created_at,
            is_favorite: true,
            status: "completed".to_string(),
        },
    ]
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.lock()?.clone())
    }

    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        Ok(self.lock()?.iter().find(|b| b.id == book_id).cloned())
    }

    async fn next_id(&self) -> Result<BookId> {
        Ok(domain::book::next_id(&self.lock()?))
    }

    async fn insert(&self, book: Book) -> Result<()> {
        let mut books = self.lock()?;
        if books.iter().any(|b| b.id == book.id) {
            return Err(RepositoryError::DuplicateId(book.id).into());
        }
        books.push(book);
        Ok(())
    }

    async fn save(&self, book: Book) -> Result<()> {
        let mut books = self.lock()?;
        let slot = books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or(RepositoryError::Missing(book.id))?;
        *slot = book;
        Ok(())
    }

    async fn remove(&self, book_id: BookId) -> Result<Option<Book>> {
        let mut books = self.lock()?;
        let index = books.iter().position(|b| b.id == book_id);
        Ok(index.map(|index| books.remove(index)))
    }

    async fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_repository_has_two_books_in_order() {
        let repo = BookRepository::seeded(Utc::now());
        let books = repo.list().await.unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "1984");
        assert_eq!(books[1].title, "The Alchemist");
        assert!(books[1].is_favorite);
        assert_eq!(repo.next_id().await.unwrap(), BookId::new(3));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let repo = BookRepository::seeded(Utc::now());
        let mut duplicate = repo.get_by_id(BookId::new(1)).await.unwrap().unwrap();
        duplicate.title = "Copy".to_string();

        assert!(repo.insert(duplicate).await.is_err());
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_replaces_in_place() {
        let repo = BookRepository::seeded(Utc::now());
        let mut book = repo.get_by_id(BookId::new(1)).await.unwrap().unwrap();
        book.title = "Nineteen Eighty-Four".to_string();

        repo.save(book).await.unwrap();

        let books = repo.list().await.unwrap();
        assert_eq!(books[0].title, "Nineteen Eighty-Four");
        assert_eq!(books[0].id, BookId::new(1));
    }

    #[tokio::test]
    async fn test_save_missing_book_fails() {
        let repo = BookRepository::new();
        let book = seed_books(Utc::now()).remove(0);
        assert!(repo.save(book).await.is_err());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let repo = BookRepository::seeded(Utc::now());

        let removed = repo.remove(BookId::new(2)).await.unwrap();
        assert_eq!(removed.map(|b| b.id), Some(BookId::new(2)));
        assert!(repo.remove(BookId::new(2)).await.unwrap().is_none());
        assert_eq!(repo.next_id().await.unwrap(), BookId::new(2));

        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(repo.next_id().await.unwrap(), BookId::new(1));
    }
}
