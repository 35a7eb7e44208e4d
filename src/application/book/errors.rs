use crate::domain::InvalidStatus;
use thiserror::Error;

/// 書籍管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookApplicationError {
    /// 書籍が見つからない
    #[error("Book not found.")]
    BookNotFound,

    /// コレクションが空（おすすめを選べない）
    #[error("No books available.")]
    NoBooksAvailable,

    /// 検索語が指定されていない
    #[error("Query required.")]
    QueryRequired,

    /// タイトルまたは著者が指定されていない
    #[error("Title and author required.")]
    TitleAndAuthorRequired,

    /// ステータスが列挙値に含まれない
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),

    /// BookRepositoryのエラー
    #[error("Book repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookApplicationError>;
