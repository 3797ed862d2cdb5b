use chrono::{DateTime, Utc};
use tracing::debug;

use crate::engine::availability::{is_available, ConflictWindow};
use crate::error::AssignmentError;
use crate::models::city::City;
use crate::models::driver::Driver;
use crate::store::{DeliveryStore, DriverDirectory};

/// A driver free at the requested time, with their lifetime delivery count.
#[derive(Debug, Clone)]
pub struct EligibleDriver {
    pub driver: Driver,
    pub total_deliveries: usize,
}

/// Drivers living in `city` with no delivery inside the conflict window around
/// `requested`. Order follows [`DriverDirectory::drivers_in_city`].
pub async fn find_eligible(
    drivers: &dyn DriverDirectory,
    deliveries: &dyn DeliveryStore,
    city: &City,
    requested: DateTime<Utc>,
    window: ConflictWindow,
) -> Result<Vec<EligibleDriver>, AssignmentError> {
    let residents = drivers.drivers_in_city(city).await?;
    if residents.is_empty() {
        return Err(AssignmentError::NoDriversInCity(city.name.clone()));
    }

    let mut eligible = Vec::with_capacity(residents.len());
    for driver in residents {
        let history = deliveries.deliveries_for_driver(&driver).await?;
        let available = is_available(&history, requested, window);
        debug!(driver = %driver.name, deliveries = history.len(), available, "availability checked");

        if available {
            eligible.push(EligibleDriver {
                total_deliveries: history.len(),
                driver,
            });
        }
    }

    if eligible.is_empty() {
        return Err(AssignmentError::NoDriversAvailable {
            city: city.name.clone(),
            at: requested,
        });
    }

    Ok(eligible)
}
