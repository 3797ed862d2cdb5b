use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::info;

use crate::api::rest::required;
use crate::error::AppError;
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::store::CustomerDirectory;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/:name", get(get_customer))
}

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub address: String,
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    let name = required("name", &payload.name)?;
    let city = required("city", &payload.city)?;
    let customer = state
        .store
        .add_customer(&name, &city, payload.address.trim())?;

    info!(customer = %customer.name, city = %customer.city.name, "customer registered");
    Ok(Json(customer))
}

async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .store
        .customer_by_name(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {name} not found")))?;

    Ok(Json(customer))
}
