//! Reference data set used by the demo binary and the test suites.

use crate::error::StoreError;
use crate::store::memory::InMemoryStore;

const CITIES: &[&str] = &["Jerusalem", "Tel-Aviv", "Beer-Sheva", "Haifa"];

const DRIVERS: &[(&str, &str)] = &[
    ("Mary", "Tel-Aviv"),
    ("Patricia", "Tel-Aviv"),
    ("Jennifer", "Haifa"),
    ("James", "Beer-Sheva"),
    ("John", "Beer-Sheva"),
    ("Robert", "Jerusalem"),
    ("David", "Jerusalem"),
    ("Daniel", "Tel-Aviv"),
    ("Noa", "Haifa"),
    ("Ofri", "Haifa"),
    ("Neta", "Jerusalem"),
];

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Beethoven", "Tel-Aviv", "Ludwig van Beethoven"),
    ("Mozart", "Jerusalem", "Wolfgang Amadeus Mozart"),
    ("Chopin", "Haifa", "Frédéric François Chopin"),
    ("Rachmaninoff", "Tel-Aviv", "Sergei Rachmaninoff"),
    ("Bach", "Tel-Aviv", "Sebastian Bach. Johann"),
];

const RESTAURANTS: &[(&str, &str, &str)] = &[
    ("meat", "Jerusalem", "All meat restaurant"),
    ("vegan", "Tel-Aviv", "Only vegan"),
    ("cafe", "Tel-Aviv", "Coffee shop"),
    ("chinese", "Tel-Aviv", "chinese restaurant"),
    ("restaurant", "Tel-Aviv", "mexican restaurant"),
];

pub fn load_demo_fixture(store: &InMemoryStore) -> Result<(), StoreError> {
    for city in CITIES {
        store.add_city(city)?;
    }
    for (name, city) in DRIVERS {
        store.add_driver(name, city)?;
    }
    for (name, city, address) in CUSTOMERS {
        store.add_customer(name, city, address)?;
    }
    for (name, city, description) in RESTAURANTS {
        store.add_restaurant(name, city, description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_demo_fixture;
    use crate::error::StoreError;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn fixture_registers_every_entity() {
        let store = InMemoryStore::new();
        load_demo_fixture(&store).unwrap();

        let counts = store.counts();
        assert_eq!(counts.cities, 4);
        assert_eq!(counts.drivers, 11);
        assert_eq!(counts.customers, 5);
        assert_eq!(counts.restaurants, 5);
        assert_eq!(counts.deliveries, 0);
    }

    #[test]
    fn loading_twice_is_a_duplicate() {
        let store = InMemoryStore::new();
        load_demo_fixture(&store).unwrap();
        assert!(matches!(
            load_demo_fixture(&store),
            Err(StoreError::Duplicate { kind: "city", .. })
        ));
    }
}
