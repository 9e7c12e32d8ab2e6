use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use crate::error::ShopError;
use crate::transfer_model::{NewProduct, ProductData, ProductPatch};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductData>>, ShopError> {
    let products = state.storage.list_products().await?;
    Ok(Json(products.into_iter().map(ProductData::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductData>), ShopError> {
    let created = state.storage.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductData>, ShopError> {
    Ok(Json(state.storage.get_product(id).await?.into()))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewProduct>,
) -> Result<Json<ProductData>, ShopError> {
    Ok(Json(state.storage.replace_product(id, &payload).await?.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPatch>,
) -> Result<Json<ProductData>, ShopError> {
    Ok(Json(state.storage.update_product(id, &payload).await?.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ShopError> {
    state.storage.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
