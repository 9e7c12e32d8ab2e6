use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use crate::error::ShopError;
use crate::transfer_model::{CustomerData, CustomerPatch, NewCustomer};

// Plain unfiltered listing; there is deliberately no per-request filtering
// on this endpoint.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerData>>, ShopError> {
    let customers = state.storage.list_customers().await?;
    Ok(Json(customers.into_iter().map(CustomerData::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewCustomer>,
) -> Result<(StatusCode, Json<CustomerData>), ShopError> {
    let created = state.storage.create_customer(&payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerData>, ShopError> {
    Ok(Json(state.storage.get_customer(id).await?.into()))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewCustomer>,
) -> Result<Json<CustomerData>, ShopError> {
    Ok(Json(state.storage.replace_customer(id, &payload).await?.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerPatch>,
) -> Result<Json<CustomerData>, ShopError> {
    Ok(Json(state.storage.update_customer(id, &payload).await?.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ShopError> {
    state.storage.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
