#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use book_store::adapters::memory::InMemoryBookRepository;
use book_store::api::handlers::AppState;
use book_store::api::router::create_router;
use book_store::application::book::ServiceDependencies;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// 初期データ（2冊）入りのサービス依存関係を作成
pub fn seeded_deps() -> ServiceDependencies {
    ServiceDependencies {
        book_repository: Arc::new(InMemoryBookRepository::seeded(Utc::now())),
    }
}

/// 空のサービス依存関係を作成
pub fn empty_deps() -> ServiceDependencies {
    ServiceDependencies {
        book_repository: Arc::new(InMemoryBookRepository::new()),
    }
}

/// 初期データ入りのルーターを作成
///
/// テストごとに独立したストアを持つ。
pub fn seeded_app() -> axum::Router {
    create_router(Arc::new(AppState {
        service_deps: seeded_deps(),
    }))
}

/// リクエストを送信してステータスと本文を返す
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    read_json(response).await
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

/// 本文を指定の型として読み出す
pub fn parse<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn patch(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
