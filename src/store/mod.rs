//! Narrow lookup capabilities the dispatch engine depends on.
//!
//! Each trait is async so a database-backed implementation can slot in without
//! touching the engine. [`memory::InMemoryStore`] implements all of them.

pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::city::City;
use crate::models::customer::Customer;
use crate::models::delivery::{Delivery, DriverDistance, NewDelivery};
use crate::models::driver::Driver;
use crate::models::restaurant::Restaurant;

#[async_trait]
pub trait CityDirectory: Send + Sync {
    async fn city_by_name(&self, name: &str) -> Result<Option<City>, StoreError>;
}

#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError>;
}

#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    async fn restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>, StoreError>;
}

#[async_trait]
pub trait DriverDirectory: Send + Sync {
    async fn driver_by_name(&self, name: &str) -> Result<Option<Driver>, StoreError>;

    /// Drivers whose home city is `city`, in a stable order.
    async fn drivers_in_city(&self, city: &City) -> Result<Vec<Driver>, StoreError>;
}

#[async_trait]
pub trait DeliveryStore: Send + Sync {
    /// Full history of `driver`, across all cities and times.
    async fn deliveries_for_driver(&self, driver: &Driver) -> Result<Vec<Delivery>, StoreError>;

    /// Persist a delivery and return it with its assigned identifier.
    async fn insert_delivery(&self, delivery: NewDelivery) -> Result<Delivery, StoreError>;
}

#[async_trait]
pub trait DistanceReport: Send + Sync {
    /// Summed distance per driver, optionally restricted to drivers living in `scope`.
    /// Drivers without deliveries are absent.
    async fn driver_distances(
        &self,
        scope: Option<&City>,
    ) -> Result<Vec<DriverDistance>, StoreError>;
}
