use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::city::City;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub city: City,
    pub description: String,
}
