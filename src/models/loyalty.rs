use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LoyaltyBalance {
    #[serde(default)]
    pub current_balance: u32,
}

/// Body for the point add/deduct endpoints. Deductions carry the redeemed
/// discount amount, credits carry whole earned points.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoyaltyAdjustment {
    pub user_id: i64,
    pub points: f64,
    pub description: String,
}
