use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, App};
use medimart_engine::{
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};
use serde_json::Value;

use crate::server::configure_api;

/// A fresh, fully-migrated SQLite store for one test.
pub async fn new_test_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

async fn send(db: &SqliteDatabase, req: TestRequest) -> (StatusCode, Value) {
    let app = App::new().configure(|cfg| configure_api(cfg, db));
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let (_, res) = res.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
    (status, body)
}

pub async fn get_request(db: &SqliteDatabase, path: &str) -> (StatusCode, Value) {
    send(db, TestRequest::get().uri(path)).await
}

pub async fn post_request(db: &SqliteDatabase, path: &str, body: Value) -> (StatusCode, Value) {
    send(db, TestRequest::post().uri(path).set_json(body)).await
}

pub async fn put_request(db: &SqliteDatabase, path: &str, body: Value) -> (StatusCode, Value) {
    send(db, TestRequest::put().uri(path).set_json(body)).await
}

pub async fn patch_request(db: &SqliteDatabase, path: &str) -> (StatusCode, Value) {
    send(db, TestRequest::patch().uri(path)).await
}

pub async fn delete_request(db: &SqliteDatabase, path: &str) -> (StatusCode, Value) {
    send(db, TestRequest::delete().uri(path)).await
}
