use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::engine::availability::ConflictWindow;
use crate::engine::distance::{DistanceEstimator, RandomDistance};
use crate::engine::eligibility::find_eligible;
use crate::engine::selection::select_least_busy;
use crate::error::AssignmentError;
use crate::models::delivery::{Delivery, NewDelivery};
use crate::models::restaurant::Restaurant;
use crate::store::{CustomerDirectory, DeliveryStore, DriverDirectory};

/// Assigns a driver to an order and persists the resulting delivery.
///
/// The availability check and the insert run under a per-city lock, so two
/// concurrent orders in one city cannot both claim the same free slot of a
/// driver. Drivers never change city, which makes this a per-driver guarantee too.
pub struct Dispatcher {
    customers: Arc<dyn CustomerDirectory>,
    drivers: Arc<dyn DriverDirectory>,
    deliveries: Arc<dyn DeliveryStore>,
    distances: Arc<dyn DistanceEstimator>,
    window: ConflictWindow,
    city_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Dispatcher {
    pub fn new<S>(store: Arc<S>, window: ConflictWindow) -> Self
    where
        S: CustomerDirectory + DriverDirectory + DeliveryStore + 'static,
    {
        Self {
            customers: store.clone(),
            drivers: store.clone(),
            deliveries: store,
            distances: Arc::new(RandomDistance::default()),
            window,
            city_locks: DashMap::new(),
        }
    }

    pub fn with_distance_estimator(mut self, distances: Arc<dyn DistanceEstimator>) -> Self {
        self.distances = distances;
        self
    }

    fn city_lock(&self, city: &str) -> Arc<Mutex<()>> {
        self.city_locks
            .entry(city.to_string())
            .or_default()
            .value()
            .clone()
    }

    pub async fn assign(
        &self,
        customer_name: &str,
        restaurant: &Restaurant,
        delivery_time: DateTime<Utc>,
    ) -> Result<Delivery, AssignmentError> {
        let customer = self
            .customers
            .customer_by_name(customer_name)
            .await?
            .ok_or_else(|| AssignmentError::CustomerNotFound(customer_name.to_string()))?;

        if customer.city.name != restaurant.city.name {
            return Err(AssignmentError::CityMismatch {
                customer_city: customer.city.name,
                restaurant_city: restaurant.city.name.clone(),
            });
        }

        let lock = self.city_lock(&restaurant.city.name);
        let _guard = lock.lock().await;

        let eligible = find_eligible(
            self.drivers.as_ref(),
            self.deliveries.as_ref(),
            &restaurant.city,
            delivery_time,
            self.window,
        )
        .await?;
        let candidates = eligible.len();

        let chosen = select_least_busy(eligible).ok_or_else(|| AssignmentError::NoDriversAvailable {
            city: restaurant.city.name.clone(),
            at: delivery_time,
        })?;

        let distance_km = self.distances.estimate_km(restaurant, &customer);
        let delivery = self
            .deliveries
            .insert_delivery(NewDelivery {
                driver: chosen.driver,
                restaurant: restaurant.clone(),
                customer,
                delivery_time,
                distance_km,
            })
            .await?;

        info!(
            delivery_id = %delivery.id,
            driver = %delivery.driver.name,
            customer = %delivery.customer.name,
            restaurant = %delivery.restaurant.name,
            city = %restaurant.city.name,
            candidates,
            prior_deliveries = chosen.total_deliveries,
            "driver assigned"
        );

        Ok(delivery)
    }
}
