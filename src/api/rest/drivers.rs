use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::info;

use crate::api::rest::required;
use crate::error::AppError;
use crate::models::driver::Driver;
use crate::state::AppState;
use crate::store::{CityDirectory, DriverDirectory};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/drivers", post(create_driver).get(list_drivers))
}

#[derive(Deserialize)]
pub struct CreateDriverRequest {
    pub name: String,
    pub city: String,
}

#[derive(Deserialize)]
pub struct DriverFilter {
    pub city: Option<String>,
}

async fn create_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    let name = required("name", &payload.name)?;
    let city = required("city", &payload.city)?;
    let driver = state.store.add_driver(&name, &city)?;

    info!(driver = %driver.name, city = %driver.city.name, "driver registered");
    Ok(Json(driver))
}

async fn list_drivers(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DriverFilter>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let Some(city_name) = filter.city else {
        return Ok(Json(state.store.list_drivers()));
    };

    let city = state
        .store
        .city_by_name(&city_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("city {city_name} not found")))?;

    Ok(Json(state.store.drivers_in_city(&city).await?))
}
