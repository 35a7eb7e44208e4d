use crate::application::book::BookApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(BookApplicationError),
    /// 本文はあるがJSONとして読めない
    MalformedBody(String),
}

impl From<BookApplicationError> for ApiError {
    fn from(err: BookApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let err = match self {
            ApiError::Application(err) => err,
            ApiError::MalformedBody(_) => return StatusCode::BAD_REQUEST,
        };

        match err {
            // 404 Not Found - リクエストされたリソースが存在しない
            BookApplicationError::BookNotFound | BookApplicationError::NoBooksAvailable => {
                StatusCode::NOT_FOUND
            }

            // 400 Bad Request - 入力の不足・不正
            BookApplicationError::QueryRequired
            | BookApplicationError::TitleAndAuthorRequired
            | BookApplicationError::InvalidStatus(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error - システム障害
            BookApplicationError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(BookApplicationError::RepositoryError(ref e)) => {
                tracing::error!("Book repository error: {}", e);
                "An unexpected error occurred".to_string()
            }
            ApiError::Application(ref other) => other.to_string(),
            ApiError::MalformedBody(ref reason) => {
                tracing::debug!(reason = %reason, "Rejected unreadable JSON body");
                "Invalid JSON body.".to_string()
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
