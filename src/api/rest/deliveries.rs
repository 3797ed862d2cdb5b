use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::rest::required;
use crate::engine::assignment::assign_delivery;
use crate::error::AppError;
use crate::models::delivery::Delivery;
use crate::state::AppState;
use crate::store::{DeliveryStore, DriverDirectory, RestaurantDirectory};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries", post(create_delivery).get(list_deliveries))
        .route("/deliveries/:id", get(get_delivery))
}

#[derive(Deserialize)]
pub struct CreateDeliveryRequest {
    pub customer: String,
    pub restaurant: String,
    pub delivery_time: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct DeliveryFilter {
    pub driver: Option<String>,
}

async fn create_delivery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Result<Json<Delivery>, AppError> {
    let customer = required("customer", &payload.customer)?;
    let restaurant_name = required("restaurant", &payload.restaurant)?;

    let restaurant = state
        .store
        .restaurant_by_name(&restaurant_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("restaurant {restaurant_name} not found")))?;

    let delivery = assign_delivery(&state, &customer, &restaurant, payload.delivery_time).await?;
    Ok(Json(delivery))
}

async fn list_deliveries(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DeliveryFilter>,
) -> Result<Json<Vec<Delivery>>, AppError> {
    let Some(driver_name) = filter.driver else {
        return Ok(Json(state.store.list_deliveries()));
    };

    let driver = state
        .store
        .driver_by_name(&driver_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("driver {driver_name} not found")))?;

    Ok(Json(state.store.deliveries_for_driver(&driver).await?))
}

async fn get_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Delivery>, AppError> {
    let delivery = state
        .store
        .delivery(id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    Ok(Json(delivery))
}
