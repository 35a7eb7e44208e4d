use crate::application::book::{self as books, BookApplicationError, ServiceDependencies};
use crate::domain::{BookId, commands::ToggleFavorite};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookListResponse, BookMessageResponse, BookResponse, CreateBookRequest, ListBooksQuery,
        MessageResponse, SearchQuery, StatsResponse, UpdateBookRequest, UpdateStatusRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// パスのIDを解釈する
///
/// 整数として読めないIDはどの書籍にも一致しないため、404として扱う。
fn parse_book_id(raw: &str) -> Result<BookId, ApiError> {
    BookId::parse_lenient(raw).ok_or_else(|| ApiError::from(BookApplicationError::BookNotFound))
}

/// JSON本文を読み出す
///
/// `Content-Type`がJSONでない、または本文がオブジェクト以外のJSONなら空の入力として扱う。
/// JSONとして読めない本文は400。
fn read_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_) | JsonRejection::JsonDataError(_)) => {
            Ok(T::default())
        }
        Err(rejection) => Err(ApiError::MalformedBody(rejection.body_text())),
    }
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books - 書籍一覧
///
/// クエリパラメータ:
/// - favorite: "true" のときお気に入りのみ
/// - status: ステータスで絞り込み（大文字小文字を区別しない）
/// - sortBy: title / author で並べ替え（それ以外は無視）
/// - page, limit: ページング（不正な値は既定値）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<BookListResponse>, ApiError> {
    let page = books::list_books(&state.service_deps, &query.to_criteria()).await?;
    Ok(Json(BookListResponse::from(page)))
}

/// GET /books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = parse_book_id(&book_id)?;
    let book = books::get_book(&state.service_deps, book_id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /books/search?query= - タイトル・著者の部分一致検索
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let found = books::search_books(&state.service_deps, query.query.as_deref()).await?;
    Ok(Json(found.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/recommend - ランダムに1冊
pub async fn recommend_book(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = books::recommend_book(&state.service_deps).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /books/stats - 集計
pub async fn book_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = books::stats(&state.service_deps).await?;
    Ok(Json(stats))
}

// ============================================================================
// Command handlers (POST / PUT / PATCH / DELETE)
// ============================================================================

/// POST /books - 書籍を登録
///
/// 本文がない場合は空の入力として扱う（タイトル・著者不足で400）。
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let req = read_body(body)?;

    let book = books::create_book(&state.service_deps, req.to_command(), Utc::now()).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// PUT /books/:id - 書籍を更新
///
/// 指定されたフィールドのみ上書きする。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    body: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = parse_book_id(&book_id)?;
    let req = read_body(body)?;

    let book = books::update_book(&state.service_deps, req.to_command(book_id)).await?;

    Ok(Json(BookResponse::from(book)))
}

/// PATCH /books/:id/favorite - お気に入りを切り替え
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookMessageResponse>, ApiError> {
    let book_id = parse_book_id(&book_id)?;

    let book = books::toggle_favorite(&state.service_deps, ToggleFavorite { book_id }).await?;

    Ok(Json(BookMessageResponse::new("Favorite status toggled.", book)))
}

/// PATCH /books/:id/status - 読書ステータスを変更
///
/// ステータスの検証はIDの存在確認より先に行う。
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<BookMessageResponse>, ApiError> {
    let req = read_body(body)?;

    // 読めないIDでも検証エラーを優先するため、ここでは404にしない
    let book_id = BookId::parse_lenient(&book_id);

    let book = books::change_status(&state.service_deps, req.to_command(book_id)).await?;

    Ok(Json(BookMessageResponse::new("Status updated.", book)))
}

/// DELETE /books/:id - 書籍を削除
///
/// 削除した書籍を返す。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = parse_book_id(&book_id)?;
    let book = books::delete_book(&state.service_deps, book_id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/reset - 全書籍を削除
pub async fn reset_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    books::reset_books(&state.service_deps).await?;
    Ok(Json(MessageResponse::new("Book list cleared.")))
}
