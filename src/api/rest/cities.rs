use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::info;

use crate::api::rest::required;
use crate::error::AppError;
use crate::models::city::City;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/cities", post(create_city).get(list_cities))
}

#[derive(Deserialize)]
pub struct CreateCityRequest {
    pub name: String,
}

async fn create_city(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCityRequest>,
) -> Result<Json<City>, AppError> {
    let name = required("name", &payload.name)?;
    let city = state.store.add_city(&name)?;

    info!(city = %city.name, "city registered");
    Ok(Json(city))
}

async fn list_cities(State(state): State<Arc<AppState>>) -> Json<Vec<City>> {
    Json(state.store.list_cities())
}
