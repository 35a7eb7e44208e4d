use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookId, CreateBookError, ReadingStatus,
    commands::{CreateBook, UpdateBook},
};

/// Book集約 - コレクション内の1冊の書籍
///
/// `status`は文字列として保持する。ステータス更新操作は列挙値を強制するが、
/// 登録と一括更新は値を検証せずにそのまま保存するため。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    // 識別子
    pub id: BookId,

    pub title: String,
    pub author: String,

    // 登録時に設定され、以後変更されない
    pub created_at: DateTime<Utc>,

    pub is_favorite: bool,
    pub status: String,
}

impl Book {
    /// 保存されたステータスが指定の列挙値と一致するか
    pub fn has_status(&self, status: ReadingStatus) -> bool {
        self.status == status.as_str()
    }
}

/// 純粋関数：次に採番するIDを求める
///
/// 現在の最大ID + 1、空なら1。
/// 最大IDの書籍を削除した後はそのIDが再利用される。
pub fn next_id(books: &[Book]) -> BookId {
    books
        .iter()
        .map(|b| b.id)
        .max()
        .map(|id| id.next())
        .unwrap_or(BookId::FIRST)
}

/// 純粋関数：書籍を登録する
///
/// ビジネスルール：
/// - タイトルと著者は必須（空文字列は未指定扱い）
/// - ステータス未指定時は unread
/// - お気に入り未指定時は false
///
/// 副作用なし。新しいBookを返す。
pub fn create_book(
    id: BookId,
    cmd: CreateBook,
    created_at: DateTime<Utc>,
) -> Result<Book, CreateBookError> {
    let (Some(title), Some(author)) = (non_empty(cmd.title), non_empty(cmd.author)) else {
        return Err(CreateBookError::MissingTitleOrAuthor);
    };

    Ok(Book {
        id,
        title,
        author,
        created_at,
        is_favorite: cmd.is_favorite.unwrap_or(false),
        status: non_empty(cmd.status)
            .unwrap_or_else(|| ReadingStatus::default().as_str().to_string()),
    })
}

/// 純粋関数：書籍を更新する
///
/// 指定されたフィールドだけを上書きし、未指定のフィールドは元の値を保つ。
/// 空文字列は未指定として扱う。
pub fn update_book(mut book: Book, cmd: UpdateBook) -> Book {
    if let Some(title) = non_empty(cmd.title) {
        book.title = title;
    }
    if let Some(author) = non_empty(cmd.author) {
        book.author = author;
    }
    if let Some(is_favorite) = cmd.is_favorite {
        book.is_favorite = is_favorite;
    }
    if let Some(status) = non_empty(cmd.status) {
        book.status = status;
    }
    book
}

/// 純粋関数：お気に入りを反転する
pub fn toggle_favorite(mut book: Book) -> Book {
    book.is_favorite = !book.is_favorite;
    book
}

/// 純粋関数：読書ステータスを変更する
///
/// 列挙値は呼び出し側で検証済み。遷移の制約はない。
pub fn change_status(mut book: Book, status: ReadingStatus) -> Book {
    book.status = status.as_str().to_string();
    book
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
