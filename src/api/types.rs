use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::book::{
    BookPage, BookStats, ListCriteria, SortKey, parse_positive, parse_positive_or,
};
use crate::domain::{
    Book, BookId,
    commands::{ChangeStatus, CreateBook, UpdateBook},
};

/// 書籍一覧取得のクエリパラメータ
///
/// 値はすべて文字列のまま受け取り、寛容に解釈する。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub favorite: Option<String>,
    pub status: Option<String>,
}

impl ListBooksQuery {
    pub fn to_criteria(&self) -> ListCriteria {
        ListCriteria {
            favorites_only: self.favorite.as_deref() == Some("true"),
            status: self.status.clone().filter(|s| !s.is_empty()),
            sort_by: self.sort_by.as_deref().and_then(SortKey::parse),
            page: Some(parse_positive_or(self.page.as_deref(), 1)),
            // 既定値は絞り込み後の件数なので、ここでは決めない
            limit: parse_positive(self.limit.as_deref()),
        }
    }
}

/// 検索のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// 文字列フィールドを取り出す
///
/// 文字列以外の値は指定なしとして扱う。空文字列の扱いはドメイン側で決める。
fn text_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

/// 書籍登録リクエスト（POST /books）
///
/// 各フィールドは型を問わず受け取り、フィールドごとに解釈する。
/// 1つのフィールドの型違いで他のフィールドが失われることはない。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<Value>,
    pub author: Option<Value>,
    pub status: Option<Value>,
    /// 真偽値以外は無視する
    pub is_favorite: Option<Value>,
}

impl CreateBookRequest {
    pub fn to_command(self) -> CreateBook {
        CreateBook {
            title: text_field(self.title),
            author: text_field(self.author),
            status: text_field(self.status),
            is_favorite: self.is_favorite.as_ref().and_then(Value::as_bool),
        }
    }
}

/// 書籍更新リクエスト（PUT /books/:id）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<Value>,
    pub author: Option<Value>,
    /// 真偽値以外は無視する
    pub is_favorite: Option<Value>,
    pub status: Option<Value>,
}

impl UpdateBookRequest {
    pub fn to_command(self, book_id: BookId) -> UpdateBook {
        UpdateBook {
            book_id,
            title: text_field(self.title),
            author: text_field(self.author),
            is_favorite: self.is_favorite.as_ref().and_then(Value::as_bool),
            status: text_field(self.status),
        }
    }
}

/// ステータス更新リクエスト（PATCH /books/:id/status）
///
/// 文字列以外のステータスは不正な値として検証で弾かれる。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<Value>,
}

impl UpdateStatusRequest {
    pub fn to_command(self, book_id: Option<BookId>) -> ChangeStatus {
        ChangeStatus {
            book_id,
            status: text_field(self.status),
        }
    }
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub status: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            title: book.title,
            author: book.author,
            created_at: book.created_at,
            is_favorite: book.is_favorite,
            status: book.status,
        }
    }
}

/// 一覧レスポンス（GET /books）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookListResponse {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<BookResponse>,
}

impl From<BookPage> for BookListResponse {
    fn from(page: BookPage) -> Self {
        Self {
            total: page.total,
            page: page.page,
            limit: page.limit,
            data: page.data.into_iter().map(BookResponse::from).collect(),
        }
    }
}

/// 集計レスポンス（GET /books/stats）
pub type StatsResponse = BookStats;

/// メッセージ付きの書籍レスポンス（PATCH系）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMessageResponse {
    pub message: String,
    pub book: BookResponse,
}

impl BookMessageResponse {
    pub fn new(message: impl Into<String>, book: Book) -> Self {
        Self {
            message: message.into(),
            book: BookResponse::from(book),
        }
    }
}

/// メッセージのみのレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
