use std::sync::Arc;

use crate::error::StoreError;
use crate::models::city::City;
use crate::models::delivery::DriverDistance;
use crate::store::DistanceReport;

pub struct RankReporter {
    source: Arc<dyn DistanceReport>,
}

impl RankReporter {
    pub fn new(source: Arc<dyn DistanceReport>) -> Self {
        Self { source }
    }

    /// Drivers by descending total distance, optionally only those living in `scope`.
    ///
    /// The sort is stable, so equal totals keep the order the source produced them in.
    pub async fn rank(&self, scope: Option<&City>) -> Result<Vec<DriverDistance>, StoreError> {
        let mut report = self.source.driver_distances(scope).await?;
        report.sort_by(|a, b| b.total_distance_km.total_cmp(&a.total_distance_km));
        Ok(report)
    }
}
