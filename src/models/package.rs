use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TourPackage {
    pub package_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub base_price: f64,
    pub duration_days: Option<u32>,
    pub capacity: Option<u32>,
    #[serde(rename = "Start_Date")]
    pub start_date: Option<DateTime<Utc>>,
}

impl TourPackage {
    /// Scheduled departure as a plain calendar date, when the backend set one.
    pub fn departure_date(&self) -> Option<NaiveDate> {
        self.start_date.map(|dt| dt.date_naive())
    }
}

/// Body for submitting a self-assembled trip. This endpoint predates the
/// rest of the API and expects camelCase keys.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomPackageRequest {
    pub destination_id: i64,
    pub spots: Vec<String>,
    pub transport_id: Option<i64>,
    pub hotel_id: Option<i64>,
    pub room_id: Option<i64>,
    pub guide_id: Option<i64>,
    pub guide_included: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub estimated_cost: f64,
}
