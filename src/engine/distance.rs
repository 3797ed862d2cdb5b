use rand::Rng;

use crate::models::customer::Customer;
use crate::models::restaurant::Restaurant;

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 20.0;

/// Source of the distance recorded on a new delivery.
pub trait DistanceEstimator: Send + Sync + std::fmt::Debug {
    fn estimate_km(&self, restaurant: &Restaurant, customer: &Customer) -> f64;
}

/// Uniform draw from `[0, max_km)`.
#[derive(Debug, Clone)]
pub struct RandomDistance {
    pub max_km: f64,
}

impl RandomDistance {
    pub fn new(max_km: f64) -> Self {
        Self {
            max_km: max_km.max(0.0),
        }
    }
}

impl Default for RandomDistance {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE_KM)
    }
}

impl DistanceEstimator for RandomDistance {
    fn estimate_km(&self, _restaurant: &Restaurant, _customer: &Customer) -> f64 {
        if !self.max_km.is_finite() || self.max_km <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(0.0..self.max_km)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

impl DistanceEstimator for FixedDistance {
    fn estimate_km(&self, _restaurant: &Restaurant, _customer: &Customer) -> f64 {
        self.0
    }
}
