use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::delivery::DriverDistance;
use crate::state::AppState;
use crate::store::CityDirectory;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reports/driver-rank", get(driver_rank))
}

#[derive(Deserialize)]
pub struct RankQuery {
    pub city: Option<String>,
}

async fn driver_rank(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RankQuery>,
) -> Result<Json<Vec<DriverDistance>>, AppError> {
    let scope = match query.city {
        Some(name) => Some(
            state
                .store
                .city_by_name(&name)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("city {name} not found")))?,
        ),
        None => None,
    };

    let report = state.ranking.rank(scope.as_ref()).await?;
    Ok(Json(report))
}
