use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customer::Customer;
use crate::models::driver::Driver;
use crate::models::restaurant::Restaurant;

/// A delivery as handed to the store; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub driver: Driver,
    pub restaurant: Restaurant,
    pub customer: Customer,
    pub delivery_time: DateTime<Utc>,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub driver: Driver,
    pub restaurant: Restaurant,
    pub customer: Customer,
    pub delivery_time: DateTime<Utc>,
    pub distance_km: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDistance {
    pub driver: Driver,
    pub total_distance_km: f64,
}
