use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::error::ApiError;
use crate::config::ApiConfig;
use crate::models::booking::{BookingRecord, BookingRequest};
use crate::models::coupon::Coupon;
use crate::models::destination::Destination;
use crate::models::guide::Guide;
use crate::models::hotel::Hotel;
use crate::models::loyalty::{LoyaltyAdjustment, LoyaltyBalance};
use crate::models::package::{CustomPackageRequest, TourPackage};
use crate::models::payment::PaymentRequest;
use crate::models::transport::TransportOption;

#[derive(Debug, Deserialize)]
struct DestinationsEnvelope {
    #[serde(default)]
    destinations: Vec<Destination>,
}

#[derive(Debug, Deserialize)]
struct DestinationEnvelope {
    destination: Destination,
}

#[derive(Debug, Deserialize)]
struct TransportsEnvelope {
    #[serde(default)]
    transports: Vec<TransportOption>,
}

// The hotel and guide endpoints wrap their lists on some deployments and
// return them bare on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HotelsEnvelope {
    Wrapped {
        #[serde(default)]
        hotels: Vec<Hotel>,
    },
    Bare(Vec<Hotel>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GuidesEnvelope {
    Wrapped {
        #[serde(default)]
        guides: Vec<Guide>,
    },
    Bare(Vec<Guide>),
}

#[derive(Debug, Deserialize)]
struct PackagesEnvelope {
    #[serde(default)]
    data: Vec<TourPackage>,
}

#[derive(Debug, Deserialize)]
struct PackageEnvelope {
    data: TourPackage,
}

#[derive(Debug, Deserialize)]
struct CouponEnvelope {
    #[serde(default)]
    success: bool,
    coupon: Option<Coupon>,
}

#[derive(Debug, Deserialize)]
struct LoyaltyBalanceEnvelope {
    data: Option<LoyaltyBalance>,
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    data: BookingRecord,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(self.endpoint(path));
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.client.post(self.endpoint(path)).json(body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response)
    }

    pub async fn get_destinations(&self) -> Result<Vec<Destination>, ApiError> {
        let envelope: DestinationsEnvelope = self.get_json("/destination/destinations", None).await?;
        Ok(envelope.destinations)
    }

    pub async fn get_destination(&self, destination_id: i64) -> Result<Destination, ApiError> {
        let path = format!("/destination/destinations/{}", destination_id);
        let envelope: DestinationEnvelope = self.get_json(&path, None).await?;
        Ok(envelope.destination)
    }

    pub async fn get_transports(&self) -> Result<Vec<TransportOption>, ApiError> {
        let envelope: TransportsEnvelope = self.get_json("/transport/transports", None).await?;
        Ok(envelope.transports)
    }

    pub async fn get_hotels(&self) -> Result<Vec<Hotel>, ApiError> {
        let envelope: HotelsEnvelope = self.get_json("/hotel/hotels", None).await?;
        Ok(match envelope {
            HotelsEnvelope::Wrapped { hotels } => hotels,
            HotelsEnvelope::Bare(hotels) => hotels,
        })
    }

    pub async fn get_guides(&self) -> Result<Vec<Guide>, ApiError> {
        let envelope: GuidesEnvelope = self.get_json("/guide/guides", None).await?;
        Ok(match envelope {
            GuidesEnvelope::Wrapped { guides } => guides,
            GuidesEnvelope::Bare(guides) => guides,
        })
    }

    pub async fn get_packages(&self) -> Result<Vec<TourPackage>, ApiError> {
        let envelope: PackagesEnvelope = self.get_json("/package/packages", None).await?;
        Ok(envelope.data)
    }

    pub async fn get_package(&self, package_id: i64) -> Result<TourPackage, ApiError> {
        let path = format!("/package/packages/{}", package_id);
        let envelope: PackageEnvelope = self.get_json(&path, None).await?;
        Ok(envelope.data)
    }

    /// Look up a coupon by its code. `Ok(None)` means the backend answered
    /// but reported the code as unknown or expired.
    pub async fn get_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, ApiError> {
        let path = format!("/coupon/code/{}", code);
        let envelope: CouponEnvelope = self.get_json(&path, None).await?;

        if envelope.success {
            Ok(envelope.coupon)
        } else {
            Ok(None)
        }
    }

    pub async fn get_loyalty_balance(&self, token: &str, user_id: i64) -> Result<u32, ApiError> {
        let path = format!("/loyalty/balance/{}", user_id);
        let envelope: LoyaltyBalanceEnvelope = self.get_json(&path, Some(token)).await?;
        Ok(envelope.data.unwrap_or_default().current_balance)
    }

    pub async fn submit_custom_package(
        &self,
        request: &CustomPackageRequest,
    ) -> Result<(), ApiError> {
        self.post_json("/package/custom", request, None).await?;
        Ok(())
    }

    pub async fn create_booking(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<BookingRecord, ApiError> {
        let response = self
            .post_json("/booking/bookings", request, Some(token))
            .await?;

        let envelope = response
            .json::<BookingEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    pub async fn create_payment(
        &self,
        token: &str,
        request: &PaymentRequest,
    ) -> Result<(), ApiError> {
        self.post_json("/payments/payments", request, Some(token))
            .await?;
        Ok(())
    }

    pub async fn add_loyalty_points(
        &self,
        token: &str,
        adjustment: &LoyaltyAdjustment,
    ) -> Result<(), ApiError> {
        self.post_json("/loyalty/add", adjustment, Some(token))
            .await?;
        Ok(())
    }

    pub async fn deduct_loyalty_points(
        &self,
        token: &str,
        adjustment: &LoyaltyAdjustment,
    ) -> Result<(), ApiError> {
        self.post_json("/loyalty/deduct", adjustment, Some(token))
            .await?;
        Ok(())
    }
}

async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        });

    ApiError::Status { status, message }
}
