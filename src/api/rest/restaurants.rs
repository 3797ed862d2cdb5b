use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::info;

use crate::api::rest::required;
use crate::error::AppError;
use crate::models::restaurant::Restaurant;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/restaurants", post(create_restaurant).get(list_restaurants))
}

#[derive(Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub description: String,
}

async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRestaurantRequest>,
) -> Result<Json<Restaurant>, AppError> {
    let name = required("name", &payload.name)?;
    let city = required("city", &payload.city)?;
    let restaurant = state
        .store
        .add_restaurant(&name, &city, payload.description.trim())?;

    info!(restaurant = %restaurant.name, city = %restaurant.city.name, "restaurant registered");
    Ok(Json(restaurant))
}

async fn list_restaurants(State(state): State<Arc<AppState>>) -> Json<Vec<Restaurant>> {
    Json(state.store.list_restaurants())
}
