use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Guide {
    pub guide_id: i64,
    pub full_name: String,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub price_per_day: f64,
}
