use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Full,
    Partial,
}

impl Default for PaymentType {
    fn default() -> Self {
        PaymentType::Full
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentRequest {
    pub booking_id: i64,
    pub amount: f64,
    pub method: String,
    pub bkash_number: String,
    pub transaction_id: String,
    pub status: String,
}
