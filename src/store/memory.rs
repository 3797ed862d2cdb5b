use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::city::City;
use crate::models::customer::Customer;
use crate::models::delivery::{Delivery, DriverDistance, NewDelivery};
use crate::models::driver::Driver;
use crate::models::restaurant::Restaurant;
use crate::store::{
    CityDirectory, CustomerDirectory, DeliveryStore, DistanceReport, DriverDirectory,
    RestaurantDirectory,
};

struct Registered<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityCounts {
    pub cities: usize,
    pub drivers: usize,
    pub customers: usize,
    pub restaurants: usize,
    pub deliveries: usize,
}

/// Concurrent in-memory store. Listings come back in registration order.
#[derive(Default)]
pub struct InMemoryStore {
    sequence: AtomicU64,
    cities: DashMap<String, Registered<City>>,
    customers: DashMap<String, Registered<Customer>>,
    restaurants: DashMap<String, Registered<Restaurant>>,
    drivers: DashMap<Uuid, Registered<Driver>>,
    driver_ids: DashMap<String, Uuid>,
    deliveries: DashMap<Uuid, Registered<Delivery>>,
    driver_deliveries: DashMap<Uuid, Vec<Delivery>>,
}

fn ordered<K, T>(map: &DashMap<K, Registered<T>>) -> Vec<T>
where
    K: Eq + std::hash::Hash,
    T: Clone,
{
    let mut entries: Vec<(u64, T)> = map
        .iter()
        .map(|entry| (entry.value().seq, entry.value().value.clone()))
        .collect();
    entries.sort_by_key(|(seq, _)| *seq);
    entries.into_iter().map(|(_, value)| value).collect()
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn require_city(&self, name: &str) -> Result<City, StoreError> {
        self.city(name)
            .ok_or_else(|| StoreError::UnknownCity(name.to_string()))
    }

    pub fn add_city(&self, name: &str) -> Result<City, StoreError> {
        match self.cities.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                kind: "city",
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let city = City::new(name);
                slot.insert(Registered {
                    seq: self.next_seq(),
                    value: city.clone(),
                });
                Ok(city)
            }
        }
    }

    pub fn add_driver(&self, name: &str, city: &str) -> Result<Driver, StoreError> {
        let city = self.require_city(city)?;

        match self.driver_ids.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                kind: "driver",
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let driver = Driver {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    city,
                };
                slot.insert(driver.id);
                self.drivers.insert(
                    driver.id,
                    Registered {
                        seq: self.next_seq(),
                        value: driver.clone(),
                    },
                );
                Ok(driver)
            }
        }
    }

    pub fn add_customer(&self, name: &str, city: &str, address: &str) -> Result<Customer, StoreError> {
        let city = self.require_city(city)?;

        match self.customers.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                kind: "customer",
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let customer = Customer {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    city,
                    address: address.to_string(),
                };
                slot.insert(Registered {
                    seq: self.next_seq(),
                    value: customer.clone(),
                });
                Ok(customer)
            }
        }
    }

    pub fn add_restaurant(
        &self,
        name: &str,
        city: &str,
        description: &str,
    ) -> Result<Restaurant, StoreError> {
        let city = self.require_city(city)?;

        match self.restaurants.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                kind: "restaurant",
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let restaurant = Restaurant {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    city,
                    description: description.to_string(),
                };
                slot.insert(Registered {
                    seq: self.next_seq(),
                    value: restaurant.clone(),
                });
                Ok(restaurant)
            }
        }
    }

    pub fn city(&self, name: &str) -> Option<City> {
        self.cities.get(name).map(|entry| entry.value.clone())
    }

    pub fn customer(&self, name: &str) -> Option<Customer> {
        self.customers.get(name).map(|entry| entry.value.clone())
    }

    pub fn restaurant(&self, name: &str) -> Option<Restaurant> {
        self.restaurants.get(name).map(|entry| entry.value.clone())
    }

    pub fn driver(&self, name: &str) -> Option<Driver> {
        let id = *self.driver_ids.get(name)?;
        self.drivers.get(&id).map(|entry| entry.value.clone())
    }

    pub fn delivery(&self, id: Uuid) -> Option<Delivery> {
        self.deliveries.get(&id).map(|entry| entry.value.clone())
    }

    pub fn list_cities(&self) -> Vec<City> {
        ordered(&self.cities)
    }

    pub fn list_drivers(&self) -> Vec<Driver> {
        ordered(&self.drivers)
    }

    pub fn list_restaurants(&self) -> Vec<Restaurant> {
        ordered(&self.restaurants)
    }

    pub fn list_deliveries(&self) -> Vec<Delivery> {
        ordered(&self.deliveries)
    }

    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            cities: self.cities.len(),
            drivers: self.drivers.len(),
            customers: self.customers.len(),
            restaurants: self.restaurants.len(),
            deliveries: self.deliveries.len(),
        }
    }
}

#[async_trait]
impl CityDirectory for InMemoryStore {
    async fn city_by_name(&self, name: &str) -> Result<Option<City>, StoreError> {
        Ok(self.city(name))
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryStore {
    async fn customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError> {
        Ok(self.customer(name))
    }
}

#[async_trait]
impl RestaurantDirectory for InMemoryStore {
    async fn restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.restaurant(name))
    }
}

#[async_trait]
impl DriverDirectory for InMemoryStore {
    async fn driver_by_name(&self, name: &str) -> Result<Option<Driver>, StoreError> {
        Ok(self.driver(name))
    }

    async fn drivers_in_city(&self, city: &City) -> Result<Vec<Driver>, StoreError> {
        Ok(self
            .list_drivers()
            .into_iter()
            .filter(|driver| driver.city.same_as(city))
            .collect())
    }
}

#[async_trait]
impl DeliveryStore for InMemoryStore {
    async fn deliveries_for_driver(&self, driver: &Driver) -> Result<Vec<Delivery>, StoreError> {
        Ok(self
            .driver_deliveries
            .get(&driver.id)
            .map(|history| history.value().clone())
            .unwrap_or_default())
    }

    async fn insert_delivery(&self, delivery: NewDelivery) -> Result<Delivery, StoreError> {
        let driver = self
            .drivers
            .get(&delivery.driver.id)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| StoreError::MissingReference {
                kind: "driver",
                name: delivery.driver.name.clone(),
            })?;
        let restaurant = self
            .restaurant(&delivery.restaurant.name)
            .filter(|stored| stored.id == delivery.restaurant.id)
            .ok_or_else(|| StoreError::MissingReference {
                kind: "restaurant",
                name: delivery.restaurant.name.clone(),
            })?;
        let customer = self
            .customer(&delivery.customer.name)
            .filter(|stored| stored.id == delivery.customer.id)
            .ok_or_else(|| StoreError::MissingReference {
                kind: "customer",
                name: delivery.customer.name.clone(),
            })?;

        // References are persisted as registered, not as supplied.
        let stored = Delivery {
            id: Uuid::new_v4(),
            driver,
            restaurant,
            customer,
            delivery_time: delivery.delivery_time,
            distance_km: delivery.distance_km,
            created_at: Utc::now(),
        };

        self.deliveries.insert(
            stored.id,
            Registered {
                seq: self.next_seq(),
                value: stored.clone(),
            },
        );
        self.driver_deliveries
            .entry(stored.driver.id)
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }
}

#[async_trait]
impl DistanceReport for InMemoryStore {
    async fn driver_distances(
        &self,
        scope: Option<&City>,
    ) -> Result<Vec<DriverDistance>, StoreError> {
        let mut totals: Vec<DriverDistance> = self
            .list_drivers()
            .into_iter()
            .filter(|driver| scope.is_none_or(|city| driver.city.same_as(city)))
            .filter_map(|driver| {
                let history = self.driver_deliveries.get(&driver.id)?;
                if history.is_empty() {
                    return None;
                }
                let total_distance_km = history.iter().map(|delivery| delivery.distance_km).sum();
                Some(DriverDistance {
                    driver,
                    total_distance_km,
                })
            })
            .collect();

        totals.sort_by(|a, b| b.total_distance_km.total_cmp(&a.total_distance_km));
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::InMemoryStore;
    use crate::error::StoreError;
    use crate::models::city::City;
    use crate::models::delivery::NewDelivery;
    use crate::models::restaurant::Restaurant;
    use crate::store::{DeliveryStore, DistanceReport, DriverDirectory};

    fn store_with_cities() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.add_city("Tel-Aviv").unwrap();
        store.add_city("Haifa").unwrap();
        store.add_restaurant("cafe", "Tel-Aviv", "Coffee shop").unwrap();
        store.add_customer("Bach", "Tel-Aviv", "Sebastian Bach").unwrap();
        store
    }

    async fn deliver(store: &InMemoryStore, driver: &str, distance_km: f64) {
        let new = NewDelivery {
            driver: store.driver(driver).unwrap(),
            restaurant: store.restaurant("cafe").unwrap(),
            customer: store.customer("Bach").unwrap(),
            delivery_time: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            distance_km,
        };
        store.insert_delivery(new).await.unwrap();
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let store = store_with_cities();

        let err = store.add_city("Haifa").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { kind: "city", .. }));

        store.add_driver("Mary", "Tel-Aviv").unwrap();
        let err = store.add_driver("Mary", "Haifa").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { kind: "driver", .. }));
    }

    #[test]
    fn registration_requires_known_city() {
        let store = store_with_cities();
        let err = store.add_driver("Noa", "Eilat").unwrap_err();
        assert!(matches!(err, StoreError::UnknownCity(name) if name == "Eilat"));
    }

    #[tokio::test]
    async fn drivers_in_city_keep_registration_order() {
        let store = store_with_cities();
        store.add_driver("Mary", "Tel-Aviv").unwrap();
        store.add_driver("Noa", "Haifa").unwrap();
        store.add_driver("Patricia", "Tel-Aviv").unwrap();
        store.add_driver("Daniel", "Tel-Aviv").unwrap();

        let tel_aviv = store.city("Tel-Aviv").unwrap();
        let names: Vec<String> = store
            .drivers_in_city(&tel_aviv)
            .await
            .unwrap()
            .into_iter()
            .map(|driver| driver.name)
            .collect();

        assert_eq!(names, vec!["Mary", "Patricia", "Daniel"]);
    }

    #[tokio::test]
    async fn insert_rejects_unregistered_driver() {
        let store = store_with_cities();
        let other = InMemoryStore::new();
        other.add_city("Tel-Aviv").unwrap();
        let stranger = other.add_driver("Ghost", "Tel-Aviv").unwrap();

        let new = NewDelivery {
            driver: stranger,
            restaurant: store.restaurant("cafe").unwrap(),
            customer: store.customer("Bach").unwrap(),
            delivery_time: Utc::now(),
            distance_km: 1.0,
        };

        let err = store.insert_delivery(new).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingReference { kind: "driver", .. }));
        assert_eq!(store.counts().deliveries, 0);
    }

    #[tokio::test]
    async fn insert_persists_registered_records() {
        let store = store_with_cities();
        let mary = store.add_driver("Mary", "Tel-Aviv").unwrap();
        let registered = store.restaurant("cafe").unwrap();

        let new = NewDelivery {
            driver: mary,
            restaurant: Restaurant {
                city: City::new("Haifa"),
                description: "edited".to_string(),
                ..registered.clone()
            },
            customer: store.customer("Bach").unwrap(),
            delivery_time: Utc::now(),
            distance_km: 1.0,
        };

        let delivery = store.insert_delivery(new).await.unwrap();
        assert_eq!(delivery.restaurant, registered);
        assert_eq!(store.delivery(delivery.id).unwrap().restaurant, registered);
    }

    #[tokio::test]
    async fn insert_rejects_restaurant_with_foreign_id() {
        let store = store_with_cities();
        let mary = store.add_driver("Mary", "Tel-Aviv").unwrap();

        let new = NewDelivery {
            driver: mary,
            restaurant: Restaurant {
                id: Uuid::new_v4(),
                ..store.restaurant("cafe").unwrap()
            },
            customer: store.customer("Bach").unwrap(),
            delivery_time: Utc::now(),
            distance_km: 1.0,
        };

        let err = store.insert_delivery(new).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingReference { kind: "restaurant", .. }));
        assert_eq!(store.counts().deliveries, 0);
    }

    #[tokio::test]
    async fn distances_are_summed_and_idle_drivers_omitted() {
        let store = store_with_cities();
        store.add_driver("Mary", "Tel-Aviv").unwrap();
        store.add_driver("Patricia", "Tel-Aviv").unwrap();
        store.add_driver("Idle", "Tel-Aviv").unwrap();

        deliver(&store, "Mary", 2.5).await;
        deliver(&store, "Patricia", 7.0).await;
        deliver(&store, "Mary", 1.5).await;

        let report = store.driver_distances(None).await.unwrap();
        let rows: Vec<(String, f64)> = report
            .into_iter()
            .map(|row| (row.driver.name, row.total_distance_km))
            .collect();

        assert_eq!(
            rows,
            vec![("Patricia".to_string(), 7.0), ("Mary".to_string(), 4.0)]
        );
    }
}
