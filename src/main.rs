use chrono::{Duration, Utc};
use env_logger::Env;

use pothik_booking::models::payment::PaymentType;
use pothik_booking::services::pricing::PricingService;
use pothik_booking::{ApiClient, ApiConfig, TripPlanner};

#[tokio::main]
async fn main() {
    println!("Pothik booking client starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    if let Err(err) = run().await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    println!("Using backend at {}", config.base_url);

    let api = ApiClient::new(&config)?;

    let mut planner = TripPlanner::new();
    planner.load_catalog(&api).await;

    let catalog = planner.catalog();
    println!(
        "Catalog loaded: {} destinations, {} transports, {} hotels, {} guides",
        catalog.destinations.len(),
        catalog.transports.len(),
        catalog.hotels.len(),
        catalog.guides.len()
    );

    // Assemble a sample three-night trip from whatever the catalog offers
    let today = Utc::now().date_naive();
    planner.set_date_range(Some(today), Some(today + Duration::days(3)));

    let destination_id = planner
        .catalog()
        .destinations
        .first()
        .map(|d| d.destination_id);
    if let Some(id) = destination_id {
        planner.select_destination(Some(id));
    }

    let hotel_room = planner
        .available_hotels()
        .iter()
        .find_map(|h| h.rooms.first().map(|r| (h.hotel_id, r.room_id)));
    if let Some((hotel_id, room_id)) = hotel_room {
        planner.select_hotel(hotel_id);
        planner.select_room(room_id);
    }

    let transport_id = planner.catalog().transports.first().map(|t| t.transport_id);
    if let Some(id) = transport_id {
        planner.select_transport(id);
    }

    let quote = planner.quote();
    println!("Sample {}-night trip estimate:", quote.nights);
    println!("  Hotel:   ৳{}", quote.hotel_cost);
    println!("  Vehicle: ৳{}", quote.vehicle_cost);
    println!("  Guide:   ৳{}", quote.guide_cost);
    println!("  Total:   ৳{}", quote.grand_total);

    match api.get_packages().await {
        Ok(packages) => {
            println!("{} fixed packages on offer", packages.len());
            if let Some(package) = packages.first() {
                let breakdown = PricingService::quote_package(
                    package.base_price,
                    None,
                    None,
                    PaymentType::Partial,
                );
                println!(
                    "  \"{}\" costs ৳{} (৳{} due upfront)",
                    package.name, breakdown.grand_total, breakdown.payable_amount
                );
            }
        }
        Err(err) => log::error!("Failed to load packages: {}", err),
    }

    Ok(())
}
