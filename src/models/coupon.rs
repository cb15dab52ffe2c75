use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Flat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Coupon {
    pub coupon_id: i64,
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    pub min_order: Option<f64>,
    pub max_discount: Option<f64>,
}
