use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub id: Uuid,
    pub name: String,
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Cities are compared by name wherever eligibility is decided.
    pub fn same_as(&self, other: &City) -> bool {
        self.name == other.name
    }
}
