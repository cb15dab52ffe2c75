use chrono::{NaiveDate, Utc};

use crate::api::{ApiClient, ApiError};
use crate::models::booking::{BookingRequest, TravelerDetails};
use crate::models::coupon::Coupon;
use crate::models::loyalty::LoyaltyAdjustment;
use crate::models::package::TourPackage;
use crate::models::payment::{PaymentRequest, PaymentType};
use crate::services::pricing::{LoyaltyRedemption, PriceBreakdown, PricingService};
use crate::services::validation;
use crate::session::Session;

/// The OTP step is simulated; this code is what the demo gateway accepts.
pub const DEMO_OTP: &str = "123456";

pub const COUPON_INVALID_MESSAGE: &str = "Invalid or expired coupon code";
pub const COUPON_FALLBACK_MESSAGE: &str = "Invalid coupon code";
pub const PAYMENT_FALLBACK_MESSAGE: &str = "Payment failed. Please try again.";

const BKASH_NUMBER_LEN: usize = 11;
const OTP_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStep {
    Details,
    Otp,
    Processing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStatus {
    InProgress,
    Succeeded { booking_id: i64 },
}

/// Books a fixed package for a single traveler and settles it over the
/// mobile wallet.
///
/// The flow mirrors the payment screen: traveler details and add-ons first,
/// then an OTP round, then the booking, payment and loyalty calls in
/// sequence. Failures never tear the flow down; they set `payment_error`
/// (or `coupon_error`) and drop back to a step the traveler can retry from.
pub struct Checkout {
    session: Session,
    package: TourPackage,
    pub travel_date: Option<NaiveDate>,
    pub traveler: TravelerDetails,
    pub emergency_contact: String,
    pub special_requests: String,
    pub agree_terms: bool,
    coupon_code: String,
    coupon: Option<Coupon>,
    coupon_error: Option<String>,
    loyalty_balance: u32,
    redeem_points: bool,
    points_to_use: u32,
    payment_type: PaymentType,
    bkash_number: String,
    bkash_otp: String,
    step: PaymentStep,
    payment_error: Option<String>,
    status: CheckoutStatus,
}

impl Checkout {
    /// Start a checkout for an already fetched package. Traveler details are
    /// prefilled from the session user, the travel date from the package
    /// schedule.
    pub fn new(package: TourPackage, session: Session) -> Self {
        let traveler = match session.user() {
            Some(user) => TravelerDetails {
                name: user.full_name.clone(),
                phone: user.phone.clone().unwrap_or_default(),
                email: user.email.clone(),
                ..TravelerDetails::default()
            },
            None => TravelerDetails::default(),
        };
        let travel_date = package.departure_date();

        Checkout {
            session,
            package,
            travel_date,
            traveler,
            emergency_contact: String::new(),
            special_requests: String::new(),
            agree_terms: false,
            coupon_code: String::new(),
            coupon: None,
            coupon_error: None,
            loyalty_balance: 0,
            redeem_points: false,
            points_to_use: 0,
            payment_type: PaymentType::default(),
            bkash_number: String::new(),
            bkash_otp: String::new(),
            step: PaymentStep::Details,
            payment_error: None,
            status: CheckoutStatus::InProgress,
        }
    }

    /// Fetch the package and, for signed-in users, the loyalty balance, then
    /// start a checkout.
    pub async fn load(
        api: &ApiClient,
        package_id: i64,
        session: Session,
    ) -> Result<Self, ApiError> {
        let package = api.get_package(package_id).await?;
        let mut checkout = Checkout::new(package, session);
        checkout.load_loyalty(api).await;
        Ok(checkout)
    }

    /// Refresh the loyalty balance. A failed lookup just leaves it at zero;
    /// redeeming points is optional anyway.
    pub async fn load_loyalty(&mut self, api: &ApiClient) {
        if let Some((user, token)) = self.session.credentials() {
            match api.get_loyalty_balance(token, user.user_id).await {
                Ok(balance) => self.loyalty_balance = balance,
                Err(err) => log::warn!("Could not fetch loyalty balance: {}", err),
            }
        }
    }

    pub fn package(&self) -> &TourPackage {
        &self.package
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    pub fn status(&self) -> &CheckoutStatus {
        &self.status
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self.status, CheckoutStatus::Succeeded { .. })
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn coupon_error(&self) -> Option<&str> {
        self.coupon_error.as_deref()
    }

    pub fn payment_error(&self) -> Option<&str> {
        self.payment_error.as_deref()
    }

    pub fn loyalty_balance(&self) -> u32 {
        self.loyalty_balance
    }

    pub fn points_to_use(&self) -> u32 {
        self.points_to_use
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn bkash_number(&self) -> &str {
        &self.bkash_number
    }

    /// Coupon codes are case-insensitive; they are stored uppercased the way
    /// the backend issues them.
    pub fn set_coupon_code(&mut self, code: &str) {
        self.coupon_code = code.to_uppercase();
    }

    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
    }

    pub fn set_redeem_points(&mut self, redeem: bool) {
        self.redeem_points = redeem;
    }

    /// Points are capped at the available balance here; the subtotal cap is
    /// applied when the breakdown is computed.
    pub fn set_points_to_use(&mut self, points: u32) {
        self.points_to_use = points.min(self.loyalty_balance);
    }

    pub fn set_bkash_number(&mut self, number: &str) {
        self.bkash_number = validation::normalize_digits(number, BKASH_NUMBER_LEN);
    }

    pub fn set_bkash_otp(&mut self, otp: &str) {
        self.bkash_otp = validation::normalize_digits(otp, OTP_LEN);
    }

    /// Price the booking as currently configured.
    pub fn breakdown(&self) -> PriceBreakdown {
        let redemption = if self.redeem_points {
            Some(LoyaltyRedemption {
                points_requested: self.points_to_use,
                balance: self.loyalty_balance,
            })
        } else {
            None
        };

        PricingService::quote_package(
            self.package.base_price,
            self.coupon.as_ref(),
            redemption.as_ref(),
            self.payment_type,
        )
    }

    /// Validate and apply the entered coupon code. Returns `true` when the
    /// coupon is now active; otherwise `coupon_error` explains why not.
    pub async fn apply_coupon(&mut self, api: &ApiClient) -> bool {
        let code = self.coupon_code.trim().to_uppercase();
        if code.is_empty() {
            self.coupon_error = Some("Please enter a coupon code".to_string());
            return false;
        }
        self.coupon_error = None;

        match api.get_coupon_by_code(&code).await {
            Ok(Some(coupon)) => {
                if let Some(min_order) = coupon.min_order {
                    if self.package.base_price < min_order {
                        self.coupon_error =
                            Some(format!("Minimum order amount is ৳{}", min_order));
                        return false;
                    }
                }
                self.coupon = Some(coupon);
                self.coupon_error = None;
                true
            }
            Ok(None) => {
                self.coupon_error = Some(COUPON_INVALID_MESSAGE.to_string());
                false
            }
            Err(err) => {
                log::error!("Coupon lookup failed: {}", err);
                self.coupon_error = Some(
                    err.server_message()
                        .unwrap_or(COUPON_FALLBACK_MESSAGE)
                        .to_string(),
                );
                false
            }
        }
    }

    pub fn remove_coupon(&mut self) {
        self.coupon = None;
        self.coupon_code.clear();
        self.coupon_error = None;
    }

    /// Move to the OTP step. The gateway integration is simulated, so this
    /// only validates the wallet number and logs the demo code.
    pub fn request_otp(&mut self) -> bool {
        if !validation::is_valid_bkash_number(&self.bkash_number) {
            self.payment_error =
                Some("Please enter a valid 11-digit bKash number".to_string());
            return false;
        }

        self.payment_error = None;
        self.step = PaymentStep::Otp;
        log::info!(
            "OTP sent to {} (demo code: {})",
            self.bkash_number,
            DEMO_OTP
        );
        true
    }

    /// Run the full payment: create the booking, record the payment, settle
    /// loyalty points. Returns `true` once the booking is confirmed. On any
    /// backend failure the flow drops back to the OTP step with an error
    /// message; calls already made are not rolled back.
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        if self.is_succeeded() {
            return true;
        }

        if !self.agree_terms {
            return self.reject("Please agree to the terms and conditions");
        }
        if !validation::is_valid_bkash_number(&self.bkash_number) {
            return self.reject("Please enter a valid bKash number");
        }
        if !validation::is_valid_otp(&self.bkash_otp) {
            return self.reject("Please enter the 6-digit OTP");
        }
        if self.traveler.name.trim().is_empty() {
            return self.reject("Please enter your full name");
        }
        if self.traveler.phone.trim().is_empty() {
            return self.reject("Please enter your phone number");
        }
        if self.traveler.email.trim().is_empty() {
            return self.reject("Please enter your email address");
        }

        let (user, token) = match self.session.credentials() {
            Some((user, token)) => (user.clone(), token.to_string()),
            None => return self.reject("Please login to continue"),
        };

        self.payment_error = None;
        self.step = PaymentStep::Processing;
        let pricing = self.breakdown();

        let traveler_details = serde_json::to_string(&[self.traveler.clone()])
            .unwrap_or_else(|_| "[]".to_string());

        // Single-traveler checkout
        let booking_request = BookingRequest {
            user_id: user.user_id,
            package_id: self.package.package_id,
            travel_date: self.travel_date,
            num_travelers: 1,
            adults: 1,
            children: 0,
            total_price: pricing.grand_total,
            paid_amount: pricing.payable_amount,
            payment_type: self.payment_type,
            special_requests: self.special_requests.clone(),
            emergency_contact: self.emergency_contact.clone(),
            traveler_details,
            coupon_id: self.coupon.as_ref().map(|c| c.coupon_id),
            coupon_discount: pricing.coupon_discount,
            loyalty_points_used: pricing.loyalty_discount,
            status: "confirmed".to_string(),
        };

        let booking = match api.create_booking(&token, &booking_request).await {
            Ok(record) => record,
            Err(err) => return self.fail(err),
        };

        let payment_request = PaymentRequest {
            booking_id: booking.booking_id,
            amount: pricing.payable_amount,
            method: "bkash".to_string(),
            bkash_number: self.bkash_number.clone(),
            transaction_id: format!("BK{}", Utc::now().timestamp_millis()),
            status: "completed".to_string(),
        };
        if let Err(err) = api.create_payment(&token, &payment_request).await {
            return self.fail(err);
        }

        if self.redeem_points && pricing.loyalty_discount > 0.0 {
            let deduction = LoyaltyAdjustment {
                user_id: user.user_id,
                points: pricing.loyalty_discount,
                description: format!("Used for booking #{}", booking.booking_id),
            };
            if let Err(err) = api.deduct_loyalty_points(&token, &deduction).await {
                return self.fail(err);
            }
        }

        let earned = PricingService::calculate_earned_points(pricing.grand_total);
        if earned > 0 {
            let credit = LoyaltyAdjustment {
                user_id: user.user_id,
                points: earned as f64,
                description: format!("Earned from booking #{}", booking.booking_id),
            };
            if let Err(err) = api.add_loyalty_points(&token, &credit).await {
                return self.fail(err);
            }
        }

        self.status = CheckoutStatus::Succeeded {
            booking_id: booking.booking_id,
        };
        true
    }

    fn reject(&mut self, message: &str) -> bool {
        self.payment_error = Some(message.to_string());
        false
    }

    fn fail(&mut self, err: ApiError) -> bool {
        log::error!("Payment failed: {}", err);
        self.payment_error = Some(
            err.server_message()
                .unwrap_or(PAYMENT_FALLBACK_MESSAGE)
                .to_string(),
        );
        self.step = PaymentStep::Otp;
        false
    }
}
