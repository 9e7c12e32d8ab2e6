use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use crate::error::ShopError;
use crate::transfer_model::{NewOrder, OrderData, OrderPatch, OrderReplace};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderData>>, ShopError> {
    let orders = state.storage.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderData::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> Result<(StatusCode, Json<OrderData>), ShopError> {
    let created = state.storage.create_order(&payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderData>, ShopError> {
    Ok(Json(state.storage.get_order(id).await?.into()))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderReplace>,
) -> Result<Json<OrderData>, ShopError> {
    Ok(Json(state.storage.replace_order(id, &payload).await?.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderPatch>,
) -> Result<Json<OrderData>, ShopError> {
    Ok(Json(state.storage.update_order(id, &payload).await?.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ShopError> {
    state.storage.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
