use std::sync::Mutex;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use serde_json::{json, Value};

use pothik_booking::models::user::User;
use pothik_booking::{ApiClient, ApiConfig, Session};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USER_ID: i64 = 7;

/// Everything the mock backend records and every switch the tests can flip.
#[derive(Default)]
pub struct MockState {
    pub custom_packages: Mutex<Vec<Value>>,
    pub bookings: Mutex<Vec<Value>>,
    pub payments: Mutex<Vec<Value>>,
    pub loyalty_credits: Mutex<Vec<Value>>,
    pub loyalty_deductions: Mutex<Vec<Value>>,
    pub fail_hotels: Mutex<bool>,
    pub fail_custom_packages: Mutex<bool>,
    pub fail_bookings: Mutex<bool>,
    pub fail_payments: Mutex<bool>,
}

/// A real HTTP server speaking the backend's dialect on a random local port.
pub struct TestApp {
    pub base_url: String,
    pub state: web::Data<MockState>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let state = web::Data::new(MockState::default());
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route(
                    "/destination/destinations",
                    web::get().to(list_destinations),
                )
                .route(
                    "/destination/destinations/{id}",
                    web::get().to(get_destination),
                )
                .route("/transport/transports", web::get().to(list_transports))
                .route("/hotel/hotels", web::get().to(list_hotels))
                .route("/guide/guides", web::get().to(list_guides))
                .route("/package/packages", web::get().to(list_packages))
                .route("/package/packages/{id}", web::get().to(get_package))
                .route("/package/custom", web::post().to(submit_custom_package))
                .route("/coupon/code/{code}", web::get().to(get_coupon))
                .route("/loyalty/balance/{user_id}", web::get().to(loyalty_balance))
                .route("/loyalty/add", web::post().to(loyalty_add))
                .route("/loyalty/deduct", web::post().to(loyalty_deduct))
                .route("/booking/bookings", web::post().to(create_booking))
                .route("/payments/payments", web::post().to(create_payment))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind mock backend");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        let config = ApiConfig::new(&self.base_url).expect("mock base url");
        ApiClient::new(&config).expect("client for mock backend")
    }

    /// Session for the seeded test user, matching what the mock accepts.
    pub fn session(&self) -> Session {
        let mut session = Session::new();
        session.login(
            User {
                user_id: TEST_USER_ID,
                full_name: "Rahim Uddin".to_string(),
                email: "rahim@example.com".to_string(),
                phone: Some("01712345678".to_string()),
            },
            TEST_TOKEN,
        );
        session
    }
}

fn authorized(req: &HttpRequest) -> bool {
    match req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
    {
        Some(header) => header == format!("Bearer {}", TEST_TOKEN),
        None => false,
    }
}

async fn list_destinations() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "destinations": [
            {
                "destination_id": 1,
                "name": "Cox's Bazar",
                "description": "Longest natural sea beach",
                "spots": [
                    {"name": "Inani Beach"},
                    {"name": "Himchari"}
                ]
            },
            {
                "destination_id": 2,
                "name": "Bandarban",
                "spots": []
            }
        ]
    }))
}

async fn get_destination(path: web::Path<i64>) -> impl Responder {
    match path.into_inner() {
        1 => HttpResponse::Ok().json(json!({
            "destination": {
                "destination_id": 1,
                "name": "Cox's Bazar",
                "description": "Longest natural sea beach",
                "spots": [{"name": "Inani Beach"}, {"name": "Himchari"}]
            }
        })),
        2 => HttpResponse::Ok().json(json!({
            "destination": {"destination_id": 2, "name": "Bandarban", "spots": []}
        })),
        _ => HttpResponse::NotFound().json(json!({"message": "Destination not found"})),
    }
}

async fn list_transports() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "transports": [
            {
                "transport_id": 4,
                "vehicle_type": "Car",
                "model": "Toyota Axio",
                "capacity": 4,
                "total_vehicles": 2,
                "price_per_day": 500
            },
            {
                "transport_id": 5,
                "vehicle_type": "Microbus",
                "model": "Hiace",
                "capacity": 11,
                "total_vehicles": 1,
                "price_per_day": 900
            }
        ]
    }))
}

// Wrapped list, the shape most deployments use.
async fn list_hotels(state: web::Data<MockState>) -> impl Responder {
    if *state.fail_hotels.lock().unwrap() {
        return HttpResponse::InternalServerError().json(json!({"message": "Hotels unavailable"}));
    }

    HttpResponse::Ok().json(json!({
        "hotels": [
            {
                "hotel_id": 2,
                "name": "Sea Pearl",
                "location": "Inani, Cox's Bazar",
                "HotelRooms": [
                    {"room_id": 9, "room_type": "Deluxe", "total_rooms": 10, "price": 1000}
                ]
            },
            {
                "hotel_id": 8,
                "name": "Hill View",
                "location": "Bandarban town",
                "destination_id": 2,
                "HotelRooms": []
            }
        ]
    }))
}

// Bare list, the older shape of this endpoint.
async fn list_guides() -> impl Responder {
    HttpResponse::Ok().json(json!([
        {"guide_id": 5, "full_name": "Karim Mia", "experience": 6, "price_per_day": 800}
    ]))
}

async fn list_packages() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "count": 2,
        "data": [
            {
                "package_id": 12,
                "name": "Sundarbans Explorer",
                "description": "Four days in the mangroves",
                "base_price": 10000,
                "duration_days": 4,
                "capacity": 20,
                "Start_Date": "2025-07-10T00:00:00.000Z"
            },
            {
                "package_id": 3,
                "name": "Srimangal Tea Trail",
                "base_price": 3000,
                "duration_days": 2
            }
        ]
    }))
}

async fn get_package(path: web::Path<i64>) -> impl Responder {
    match path.into_inner() {
        12 => HttpResponse::Ok().json(json!({
            "data": {
                "package_id": 12,
                "name": "Sundarbans Explorer",
                "description": "Four days in the mangroves",
                "base_price": 10000,
                "duration_days": 4,
                "capacity": 20,
                "Start_Date": "2025-07-10T00:00:00.000Z"
            }
        })),
        3 => HttpResponse::Ok().json(json!({
            "data": {
                "package_id": 3,
                "name": "Srimangal Tea Trail",
                "base_price": 3000,
                "duration_days": 2
            }
        })),
        _ => HttpResponse::NotFound().json(json!({"error": "Package not found"})),
    }
}

async fn submit_custom_package(
    state: web::Data<MockState>,
    body: web::Json<Value>,
) -> impl Responder {
    if *state.fail_custom_packages.lock().unwrap() {
        return HttpResponse::InternalServerError()
            .json(json!({"message": "Could not generate package"}));
    }

    state.custom_packages.lock().unwrap().push(body.into_inner());
    HttpResponse::Created().json(json!({"success": true}))
}

async fn get_coupon(path: web::Path<String>) -> impl Responder {
    match path.into_inner().as_str() {
        "SAVE20" => HttpResponse::Ok().json(json!({
            "success": true,
            "coupon": {
                "coupon_id": 301,
                "code": "SAVE20",
                "discount_type": "percentage",
                "discount_value": 20,
                "min_order": null,
                "max_discount": 500
            }
        })),
        "FLAT500" => HttpResponse::Ok().json(json!({
            "success": true,
            "coupon": {
                "coupon_id": 302,
                "code": "FLAT500",
                "discount_type": "flat",
                "discount_value": 500,
                "min_order": 5000,
                "max_discount": null
            }
        })),
        "EXPIRED" => HttpResponse::Ok().json(json!({"success": false})),
        _ => HttpResponse::NotFound().json(json!({"message": "Coupon not found"})),
    }
}

async fn loyalty_balance(req: HttpRequest, path: web::Path<i64>) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}));
    }
    if path.into_inner() != TEST_USER_ID {
        return HttpResponse::NotFound().json(json!({"error": "User not found"}));
    }

    HttpResponse::Ok().json(json!({"data": {"current_balance": 300}}))
}

async fn loyalty_add(
    req: HttpRequest,
    state: web::Data<MockState>,
    body: web::Json<Value>,
) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}));
    }

    state.loyalty_credits.lock().unwrap().push(body.into_inner());
    HttpResponse::Ok().json(json!({"success": true}))
}

async fn loyalty_deduct(
    req: HttpRequest,
    state: web::Data<MockState>,
    body: web::Json<Value>,
) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}));
    }

    state.loyalty_deductions.lock().unwrap().push(body.into_inner());
    HttpResponse::Ok().json(json!({"success": true}))
}

async fn create_booking(
    req: HttpRequest,
    state: web::Data<MockState>,
    body: web::Json<Value>,
) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}));
    }
    if *state.fail_bookings.lock().unwrap() {
        return HttpResponse::InternalServerError()
            .json(json!({"error": "Could not create booking"}));
    }

    let mut bookings = state.bookings.lock().unwrap();
    bookings.push(body.into_inner());
    let booking_id = 500 + bookings.len() as i64;

    HttpResponse::Created().json(json!({
        "data": {"booking_id": booking_id, "status": "confirmed"}
    }))
}

async fn create_payment(
    req: HttpRequest,
    state: web::Data<MockState>,
    body: web::Json<Value>,
) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}));
    }
    if *state.fail_payments.lock().unwrap() {
        return HttpResponse::InternalServerError()
            .json(json!({"error": "Payment gateway unavailable"}));
    }

    state.payments.lock().unwrap().push(body.into_inner());
    HttpResponse::Created().json(json!({"success": true}))
}
