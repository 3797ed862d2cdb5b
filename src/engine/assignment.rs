use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::AssignmentError;
use crate::models::delivery::Delivery;
use crate::models::restaurant::Restaurant;
use crate::state::AppState;

/// Runs one assignment through the dispatcher, records its outcome and
/// publishes the new delivery to event subscribers.
pub async fn assign_delivery(
    state: &AppState,
    customer_name: &str,
    restaurant: &Restaurant,
    delivery_time: DateTime<Utc>,
) -> Result<Delivery, AssignmentError> {
    let start = Instant::now();
    let result = state
        .dispatcher
        .assign(customer_name, restaurant, delivery_time)
        .await;
    let elapsed = start.elapsed().as_secs_f64();

    let outcome = match &result {
        Ok(_) => "success",
        Err(err) => err.kind(),
    };
    state
        .metrics
        .assignment_latency_seconds
        .with_label_values(&[outcome])
        .observe(elapsed);
    state
        .metrics
        .assignments_total
        .with_label_values(&[outcome])
        .inc();

    match &result {
        Ok(delivery) => {
            state
                .metrics
                .deliveries_by_city_total
                .with_label_values(&[&delivery.restaurant.city.name])
                .inc();
            let _ = state.delivery_events_tx.send(delivery.clone());
        }
        Err(err) => {
            warn!(
                kind = err.kind(),
                error = %err,
                customer = customer_name,
                restaurant = %restaurant.name,
                "assignment rejected"
            );
        }
    }

    result
}
