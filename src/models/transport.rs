use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportOption {
    pub transport_id: i64,
    pub vehicle_type: String,
    pub model: Option<String>,
    /// Maximum passengers per vehicle. Zero means the backend left it unset.
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub total_vehicles: u32,
    #[serde(default)]
    pub price_per_day: f64,
}
