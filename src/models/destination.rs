use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Destination {
    pub destination_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub spots: Vec<TouristSpot>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TouristSpot {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}
