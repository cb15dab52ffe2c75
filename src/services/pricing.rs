use chrono::NaiveDate;
use serde::Serialize;

use crate::models::coupon::{Coupon, DiscountType};
use crate::models::payment::PaymentType;

/// Tax is not charged on bookings yet. Kept as a named rate so the breakdown
/// already carries the line item.
pub const TAX_RATE: f64 = 0.0;

/// Flat service fee per booking. Currently waived.
pub const SERVICE_FEE: f64 = 0.0;

/// Share of the grand total due upfront when paying partially.
pub const PARTIAL_PAYMENT_SHARE: f64 = 0.5;

/// Loyalty points earned per unit of grand total.
pub const LOYALTY_EARN_RATE: f64 = 0.05;

/// A redemption request against a known point balance. One point is worth
/// one unit of currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoyaltyRedemption {
    pub points_requested: u32,
    pub balance: u32,
}

/// Full cost breakdown of a booking or an assembled trip. Every discount and
/// clamp has already been applied; fields only need to be displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub hotel_cost: f64,
    pub vehicle_cost: f64,
    pub guide_cost: f64,
    pub subtotal: f64,
    pub coupon_discount: f64,
    pub loyalty_discount: f64,
    pub tax: f64,
    pub service_fee: f64,
    pub grand_total: f64,
    pub partial_amount: f64,
    pub payable_amount: f64,
}

impl PriceBreakdown {
    /// What remains after the upfront payment. Zero when paying in full.
    pub fn remaining_due(&self) -> f64 {
        self.grand_total - self.payable_amount
    }
}

pub struct PricingService;

impl PricingService {
    /// Number of nights between two dates. Missing or inverted ranges count
    /// as zero rather than failing.
    pub fn calculate_nights(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
        match (start, end) {
            (Some(start), Some(end)) => (end - start).num_days().max(0) as u32,
            _ => 0,
        }
    }

    /// Discount granted by a coupon, never exceeding the subtotal or the
    /// coupon's own cap.
    pub fn calculate_coupon_discount(coupon: &Coupon, subtotal: f64) -> f64 {
        let raw = match coupon.discount_type {
            DiscountType::Percentage => {
                let discount = subtotal * coupon.discount_value / 100.0;
                match coupon.max_discount {
                    Some(cap) => discount.min(cap),
                    None => discount,
                }
            }
            DiscountType::Flat => coupon.discount_value,
        };

        raw.min(subtotal).max(0.0)
    }

    /// Discount from redeemed loyalty points, limited by the requested
    /// amount, the available balance and the subtotal.
    pub fn calculate_loyalty_discount(
        redemption: Option<&LoyaltyRedemption>,
        subtotal: f64,
    ) -> f64 {
        match redemption {
            Some(r) => (r.points_requested.min(r.balance) as f64)
                .min(subtotal)
                .max(0.0),
            None => 0.0,
        }
    }

    /// Points credited back after a completed payment (5% of the grand
    /// total, rounded down).
    pub fn calculate_earned_points(grand_total: f64) -> u32 {
        (grand_total * LOYALTY_EARN_RATE).max(0.0).floor() as u32
    }

    /// Price a self-assembled trip from its per-night unit prices. Components
    /// that were not selected are passed as zero.
    pub fn quote_custom_trip(
        nights: u32,
        room_price: f64,
        transport_price: f64,
        guide_price: f64,
    ) -> PriceBreakdown {
        let nights_f = nights as f64;
        let hotel_cost = room_price * nights_f;
        let vehicle_cost = transport_price * nights_f;
        let guide_cost = guide_price * nights_f;
        let subtotal = hotel_cost + vehicle_cost + guide_cost;

        PriceBreakdown {
            nights,
            hotel_cost,
            vehicle_cost,
            guide_cost,
            subtotal,
            coupon_discount: 0.0,
            loyalty_discount: 0.0,
            tax: subtotal * TAX_RATE,
            service_fee: SERVICE_FEE,
            grand_total: subtotal.max(0.0),
            partial_amount: (subtotal.max(0.0) * PARTIAL_PAYMENT_SHARE).round(),
            payable_amount: subtotal.max(0.0),
        }
    }

    /// Price a fixed package booking with optional coupon and loyalty
    /// redemption. The payable amount follows the chosen payment type.
    pub fn quote_package(
        base_price: f64,
        coupon: Option<&Coupon>,
        loyalty: Option<&LoyaltyRedemption>,
        payment_type: PaymentType,
    ) -> PriceBreakdown {
        let subtotal = base_price;
        let coupon_discount = coupon
            .map(|c| Self::calculate_coupon_discount(c, subtotal))
            .unwrap_or(0.0);
        let loyalty_discount = Self::calculate_loyalty_discount(loyalty, subtotal);

        let taxable = subtotal - coupon_discount - loyalty_discount;
        let tax = taxable * TAX_RATE;
        let service_fee = SERVICE_FEE;
        let grand_total = (taxable + tax + service_fee).max(0.0);
        let partial_amount = (grand_total * PARTIAL_PAYMENT_SHARE).round();

        let payable_amount = match payment_type {
            PaymentType::Full => grand_total,
            PaymentType::Partial => partial_amount,
        };

        PriceBreakdown {
            nights: 0,
            hotel_cost: 0.0,
            vehicle_cost: 0.0,
            guide_cost: 0.0,
            subtotal,
            coupon_discount,
            loyalty_discount,
            tax,
            service_fee,
            grand_total,
            partial_amount,
            payable_amount,
        }
    }
}
