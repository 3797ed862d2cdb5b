use chrono::{DateTime, Duration, Utc};

use crate::models::delivery::Delivery;

/// Half-width of the interval around a requested time in which a driver
/// cannot take another delivery. Both ends are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictWindow {
    half_width: Duration,
}

impl ConflictWindow {
    pub fn new(half_width: Duration) -> Self {
        Self { half_width }
    }

    /// `None` when the minutes do not fit in a `Duration`.
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Duration::try_minutes(minutes).map(Self::new)
    }

    pub fn half_width(&self) -> Duration {
        self.half_width
    }

    /// A gap of exactly `half_width` does not conflict.
    pub fn conflicts(&self, requested: DateTime<Utc>, existing: DateTime<Utc>) -> bool {
        existing.signed_duration_since(requested).abs() < self.half_width
    }
}

impl Default for ConflictWindow {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

pub fn is_available(
    driver_deliveries: &[Delivery],
    requested: DateTime<Utc>,
    window: ConflictWindow,
) -> bool {
    !driver_deliveries
        .iter()
        .any(|delivery| window.conflicts(requested, delivery.delivery_time))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::{is_available, ConflictWindow};
    use crate::models::city::City;
    use crate::models::customer::Customer;
    use crate::models::delivery::Delivery;
    use crate::models::driver::Driver;
    use crate::models::restaurant::Restaurant;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn delivery_at(delivery_time: DateTime<Utc>) -> Delivery {
        let city = City::new("Haifa");
        Delivery {
            id: Uuid::new_v4(),
            driver: Driver {
                id: Uuid::from_u128(1),
                name: "Noa".to_string(),
                city: city.clone(),
            },
            restaurant: Restaurant {
                id: Uuid::from_u128(2),
                name: "falafel".to_string(),
                city: city.clone(),
                description: "street food".to_string(),
            },
            customer: Customer {
                id: Uuid::from_u128(3),
                name: "Chopin".to_string(),
                city,
                address: "Carmel".to_string(),
            },
            delivery_time,
            distance_km: 3.0,
            created_at: delivery_time,
        }
    }

    #[test]
    fn driver_without_history_is_available() {
        assert!(is_available(&[], noon(), ConflictWindow::default()));
    }

    #[test]
    fn delivery_inside_window_blocks() {
        let window = ConflictWindow::default();
        for offset in [-59, -30, 0, 1, 59] {
            let history = [delivery_at(noon() + Duration::minutes(offset))];
            assert!(
                !is_available(&history, noon(), window),
                "offset {offset} minutes should conflict"
            );
        }
    }

    #[test]
    fn delivery_exactly_one_hour_away_does_not_block() {
        let window = ConflictWindow::default();
        let before = [delivery_at(noon() - Duration::hours(1))];
        let after = [delivery_at(noon() + Duration::hours(1))];

        assert!(is_available(&before, noon(), window));
        assert!(is_available(&after, noon(), window));
    }

    #[test]
    fn delivery_more_than_one_hour_away_does_not_block() {
        let window = ConflictWindow::default();
        let history = [
            delivery_at(noon() - Duration::minutes(61)),
            delivery_at(noon() + Duration::hours(5)),
        ];
        assert!(is_available(&history, noon(), window));
    }

    #[test]
    fn one_conflict_among_many_is_enough() {
        let window = ConflictWindow::default();
        let history = [
            delivery_at(noon() - Duration::hours(3)),
            delivery_at(noon() + Duration::minutes(50)),
            delivery_at(noon() + Duration::hours(3)),
        ];
        assert!(!is_available(&history, noon(), window));
    }

    #[test]
    fn narrower_window_shrinks_conflicts() {
        let window = ConflictWindow::from_minutes(30).unwrap();
        let history = [delivery_at(noon() + Duration::minutes(45))];
        assert!(is_available(&history, noon(), window));
        assert_eq!(window.half_width(), Duration::minutes(30));
    }

    #[test]
    fn window_edges_of_the_calendar_do_not_overflow() {
        let window = ConflictWindow::default();
        let latest = DateTime::<Utc>::MAX_UTC;
        let earliest = DateTime::<Utc>::MIN_UTC;

        assert!(!is_available(&[delivery_at(latest)], latest, window));
        assert!(!is_available(&[delivery_at(earliest)], earliest, window));
        assert!(is_available(&[delivery_at(earliest)], latest, window));
        assert!(is_available(
            &[delivery_at(latest - Duration::hours(1))],
            latest,
            window
        ));
    }

    #[test]
    fn oversized_minutes_are_rejected() {
        assert!(ConflictWindow::from_minutes(i64::MAX).is_none());
        assert_eq!(
            ConflictWindow::from_minutes(60),
            Some(ConflictWindow::default())
        );
    }
}
