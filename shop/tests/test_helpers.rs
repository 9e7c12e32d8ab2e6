#![allow(dead_code)]

use std::sync::Arc;

use shop::api::{AppState, router};
use shop::schema;
use shop::shop_storage::ShopStorage;

/// Fresh storage over its own in-memory database with the schema applied.
pub async fn setup_storage() -> ShopStorage {
    let storage = ShopStorage::connect(&common::test_helpers::get_test_database_url())
        .await
        .expect("failed to open test database");
    schema::create_schema(storage.connection())
        .await
        .expect("failed to create schema");
    storage
}

/// Router over a fresh storage, for driving handlers with oneshot requests.
pub async fn setup_app() -> axum::Router {
    router(AppState::new(Arc::new(setup_storage().await)))
}
