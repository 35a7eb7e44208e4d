use crate::domain::{self, Book, BookId, CreateBookError, commands::*};
use crate::ports::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::{BookApplicationError, Result};

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// 各ユースケースは純粋な関数として依存関係を受け取る。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
}

/// IDで書籍を読み込むヘルパー関数
///
/// 更新系のユースケースで共通利用される。
///
/// # エラー
/// - RepositoryError: 読み込み失敗
/// - BookNotFound: 該当IDの書籍が存在しない
pub(super) async fn load_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    deps.book_repository
        .get_by_id(book_id)
        .await
        .map_err(BookApplicationError::RepositoryError)?
        .ok_or(BookApplicationError::BookNotFound)
}

async fn save_book(deps: &ServiceDependencies, book: &Book) -> Result<()> {
    deps.book_repository
        .save(book.clone())
        .await
        .map_err(BookApplicationError::RepositoryError)
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - タイトルと著者が指定されていること
/// - IDは現在の最大ID + 1（空なら1）
/// - 登録日時は`created_at`で固定され、以後変更されない
///
/// # 戻り値
/// 登録された書籍
pub async fn create_book(
    deps: &ServiceDependencies,
    cmd: CreateBook,
    created_at: DateTime<Utc>,
) -> Result<Book> {
    // 1. 入力の検証（採番より先に行う）
    if cmd.title.as_deref().unwrap_or_default().is_empty()
        || cmd.author.as_deref().unwrap_or_default().is_empty()
    {
        return Err(BookApplicationError::TitleAndAuthorRequired);
    }

    // 2. IDの採番
    let book_id = deps
        .book_repository
        .next_id()
        .await
        .map_err(BookApplicationError::RepositoryError)?;

    // 3. ドメイン層の純粋関数を呼び出し
    let book = domain::book::create_book(book_id, cmd, created_at).map_err(|e| match e {
        CreateBookError::MissingTitleOrAuthor => BookApplicationError::TitleAndAuthorRequired,
    })?;

    // 4. 末尾に追加
    deps.book_repository
        .insert(book.clone())
        .await
        .map_err(BookApplicationError::RepositoryError)?;

    tracing::info!(book_id = %book.id, title = %book.title, "book created");

    Ok(book)
}

/// 書籍を更新する
///
/// 指定されたフィールドだけを上書きする（未指定のフィールドは変更しない）。
/// ステータスは列挙値として検証しない。
pub async fn update_book(deps: &ServiceDependencies, cmd: UpdateBook) -> Result<Book> {
    let book = load_book(deps, cmd.book_id).await?;

    let updated = domain::book::update_book(book, cmd);
    save_book(deps, &updated).await?;

    tracing::debug!(book_id = %updated.id, "book updated");

    Ok(updated)
}

/// お気に入りを切り替える
pub async fn toggle_favorite(deps: &ServiceDependencies, cmd: ToggleFavorite) -> Result<Book> {
    let book = load_book(deps, cmd.book_id).await?;

    let updated = domain::book::toggle_favorite(book);
    save_book(deps, &updated).await?;

    tracing::debug!(book_id = %updated.id, is_favorite = updated.is_favorite, "favorite toggled");

    Ok(updated)
}

/// 読書ステータスを変更する
///
/// ビジネスルール：
/// - ステータスが unread / reading / completed のいずれかであること
/// - 検証は存在確認より先に行う（存在しないIDでも不正なステータスは検証エラー）
pub async fn change_status(deps: &ServiceDependencies, cmd: ChangeStatus) -> Result<Book> {
    // 1. ステータスの検証
    let status = cmd.parse_status()?;

    // 2. 書籍の存在確認
    let book_id = cmd.book_id.ok_or(BookApplicationError::BookNotFound)?;
    let book = load_book(deps, book_id).await?;

    // 3. ドメイン層の純粋関数を呼び出し
    let updated = domain::book::change_status(book, status);
    save_book(deps, &updated).await?;

    tracing::debug!(book_id = %updated.id, %status, "status changed");

    Ok(updated)
}

/// 書籍を削除する
///
/// # 戻り値
/// 削除された書籍
pub async fn delete_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    let removed = deps
        .book_repository
        .remove(book_id)
        .await
        .map_err(BookApplicationError::RepositoryError)?
        .ok_or(BookApplicationError::BookNotFound)?;

    tracing::info!(book_id = %removed.id, "book deleted");

    Ok(removed)
}

/// 全書籍を削除する
pub async fn reset_books(deps: &ServiceDependencies) -> Result<()> {
    deps.book_repository
        .clear()
        .await
        .map_err(BookApplicationError::RepositoryError)?;

    tracing::info!("book list cleared");

    Ok(())
}
