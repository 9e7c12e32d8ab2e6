use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use crate::error::ShopError;
use crate::transfer_model::{NewOrderItem, OrderItemData, OrderItemPatch};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderItemData>>, ShopError> {
    let items = state.storage.list_order_items().await?;
    Ok(Json(items.into_iter().map(OrderItemData::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewOrderItem>,
) -> Result<(StatusCode, Json<OrderItemData>), ShopError> {
    let created = state.storage.create_order_item(&payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderItemData>, ShopError> {
    Ok(Json(state.storage.get_order_item(id).await?.into()))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewOrderItem>,
) -> Result<Json<OrderItemData>, ShopError> {
    Ok(Json(state.storage.replace_order_item(id, &payload).await?.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemPatch>,
) -> Result<Json<OrderItemData>, ShopError> {
    Ok(Json(state.storage.update_order_item(id, &payload).await?.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ShopError> {
    state.storage.delete_order_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
