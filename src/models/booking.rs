use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::payment::PaymentType;

/// Body for creating a booking. The backend stores traveler details as a
/// JSON-encoded string, so callers serialize the traveler list themselves.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BookingRequest {
    pub user_id: i64,
    pub package_id: i64,
    pub travel_date: Option<NaiveDate>,
    pub num_travelers: u32,
    pub adults: u32,
    pub children: u32,
    pub total_price: f64,
    pub paid_amount: f64,
    pub payment_type: PaymentType,
    pub special_requests: String,
    pub emergency_contact: String,
    pub traveler_details: String,
    pub coupon_id: Option<i64>,
    pub coupon_discount: f64,
    pub loyalty_points_used: f64,
    pub status: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TravelerDetails {
    pub name: String,
    #[serde(default)]
    pub nid: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "type")]
    pub traveler_type: String,
}

impl Default for TravelerDetails {
    fn default() -> Self {
        TravelerDetails {
            name: String::new(),
            nid: String::new(),
            phone: String::new(),
            email: String::new(),
            traveler_type: "adult".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BookingRecord {
    pub booking_id: i64,
    pub status: Option<String>,
}
