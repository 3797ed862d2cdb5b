use crate::engine::eligibility::EligibleDriver;

/// Candidate with the fewest lifetime deliveries. Ties go to the earliest
/// candidate in input order.
pub fn select_least_busy<I>(candidates: I) -> Option<EligibleDriver>
where
    I: IntoIterator<Item = EligibleDriver>,
{
    candidates.into_iter().reduce(|best, next| {
        if next.total_deliveries < best.total_deliveries {
            next
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::select_least_busy;
    use crate::engine::eligibility::EligibleDriver;
    use crate::models::city::City;
    use crate::models::driver::Driver;

    fn candidates(loads: &[usize]) -> Vec<EligibleDriver> {
        let city = City::new("Jerusalem");
        loads
            .iter()
            .enumerate()
            .map(|(index, load)| EligibleDriver {
                driver: Driver {
                    id: Uuid::from_u128(index as u128),
                    name: format!("driver-{index}"),
                    city: city.clone(),
                },
                total_deliveries: *load,
            })
            .collect()
    }

    #[test]
    fn picks_minimum_load() {
        let chosen = select_least_busy(candidates(&[4, 2, 7, 3])).unwrap();
        assert_eq!(chosen.driver.name, "driver-1");
    }

    #[test]
    fn tie_goes_to_first_in_input_order() {
        let chosen = select_least_busy(candidates(&[3, 1, 1])).unwrap();
        assert_eq!(chosen.driver.name, "driver-1");
    }

    #[test]
    fn all_equal_keeps_first() {
        let chosen = select_least_busy(candidates(&[0, 0, 0])).unwrap();
        assert_eq!(chosen.driver.name, "driver-0");
    }

    #[test]
    fn empty_input_selects_nobody() {
        assert!(select_least_busy(candidates(&[])).is_none());
    }
}
