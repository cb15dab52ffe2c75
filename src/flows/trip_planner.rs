use chrono::NaiveDate;

use crate::api::ApiClient;
use crate::flows::selection::TripSelection;
use crate::models::catalog::Catalog;
use crate::models::destination::{Destination, TouristSpot};
use crate::models::guide::Guide;
use crate::models::hotel::{Hotel, RoomType};
use crate::models::package::CustomPackageRequest;
use crate::models::transport::TransportOption;
use crate::services::pricing::{PriceBreakdown, PricingService};

pub const INVALID_TRIP_MESSAGE: &str = "Please select a destination and valid travel dates.";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Which catalog lists are still being fetched. Everything starts out
/// loading; each list flips to done independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogLoading {
    pub destinations: bool,
    pub transports: bool,
    pub hotels: bool,
    pub guides: bool,
}

impl Default for CatalogLoading {
    fn default() -> Self {
        CatalogLoading {
            destinations: true,
            transports: true,
            hotels: true,
            guides: true,
        }
    }
}

impl CatalogLoading {
    pub fn any(&self) -> bool {
        self.destinations || self.transports || self.hotels || self.guides
    }
}

/// Summary shown once a trip request has been accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TripConfirmation {
    pub destination: Option<String>,
    pub nights: u32,
    pub estimated_cost: f64,
}

/// Drives the build-your-own-trip screen: holds the fetched catalog, the
/// traveler's current selection and the submission state.
///
/// Selection changes that need catalog knowledge (seat capacity, room
/// ownership) are checked here; everything else is forwarded to
/// [`TripSelection`]. A quote can be taken at any point and only reflects
/// components that resolve against the catalog.
pub struct TripPlanner {
    catalog: Catalog,
    loading: CatalogLoading,
    selection: TripSelection,
    submit_error: Option<String>,
    confirmation: Option<TripConfirmation>,
}

impl TripPlanner {
    pub fn new() -> Self {
        TripPlanner {
            catalog: Catalog::default(),
            loading: CatalogLoading::default(),
            selection: TripSelection::new(),
            submit_error: None,
            confirmation: None,
        }
    }

    /// Fetch all four reference lists concurrently. A list that fails to
    /// load stays empty; the planner remains usable with whatever arrived.
    pub async fn load_catalog(&mut self, api: &ApiClient) {
        let (destinations, transports, hotels, guides) = futures::join!(
            api.get_destinations(),
            api.get_transports(),
            api.get_hotels(),
            api.get_guides(),
        );

        match destinations {
            Ok(list) => self.set_destinations(list),
            Err(err) => log::error!("Failed to load destinations: {}", err),
        }
        match transports {
            Ok(list) => self.set_transports(list),
            Err(err) => log::error!("Failed to load transports: {}", err),
        }
        match hotels {
            Ok(list) => self.set_hotels(list),
            Err(err) => log::error!("Failed to load hotels: {}", err),
        }
        match guides {
            Ok(list) => self.set_guides(list),
            Err(err) => log::error!("Failed to load guides: {}", err),
        }

        self.loading = CatalogLoading {
            destinations: false,
            transports: false,
            hotels: false,
            guides: false,
        };
    }

    pub fn set_destinations(&mut self, destinations: Vec<Destination>) {
        self.catalog.destinations = destinations;
        self.loading.destinations = false;
    }

    pub fn set_transports(&mut self, transports: Vec<TransportOption>) {
        self.catalog.transports = transports;
        self.loading.transports = false;
    }

    pub fn set_hotels(&mut self, hotels: Vec<Hotel>) {
        self.catalog.hotels = hotels;
        self.loading.hotels = false;
    }

    pub fn set_guides(&mut self, guides: Vec<Guide>) {
        self.catalog.guides = guides;
        self.loading.guides = false;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn loading(&self) -> CatalogLoading {
        self.loading
    }

    pub fn selection(&self) -> &TripSelection {
        &self.selection
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&TripConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.confirmation.is_some()
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.selection = self
            .selection
            .clone()
            .with_start_date(start)
            .with_end_date(end);
    }

    pub fn set_travelers(&mut self, adults: u32, children: u32) {
        self.selection = self.selection.clone().with_travelers(adults, children);
    }

    pub fn select_destination(&mut self, destination_id: Option<i64>) {
        self.selection = self.selection.clone().with_destination(destination_id);
    }

    pub fn toggle_spot(&mut self, name: &str) {
        self.selection = self.selection.clone().toggle_spot(name);
    }

    /// Toggle a transport option. Returns `false` without changing anything
    /// when the vehicle is too small for the current traveler count.
    pub fn select_transport(&mut self, transport_id: i64) -> bool {
        let capacity = self
            .catalog
            .transport(transport_id)
            .map(|t| t.capacity)
            .unwrap_or(0);

        if capacity > 0 && self.selection.total_travelers() > capacity {
            return false;
        }

        self.selection = self.selection.clone().toggle_transport(transport_id);
        true
    }

    pub fn select_hotel(&mut self, hotel_id: i64) {
        self.selection = self.selection.clone().toggle_hotel(hotel_id);
    }

    /// Pick a room of the currently selected hotel. Returns `false` when no
    /// hotel is selected or the room belongs to a different hotel.
    pub fn select_room(&mut self, room_id: i64) -> bool {
        let valid = self
            .selection
            .hotel_id
            .map(|hotel_id| self.catalog.room(hotel_id, room_id).is_some())
            .unwrap_or(false);

        if !valid {
            return false;
        }

        self.selection = self.selection.clone().with_room(room_id);
        true
    }

    pub fn select_guide(&mut self, guide_id: i64) {
        self.selection = self.selection.clone().toggle_guide(guide_id);
    }

    /// Spots of the selected destination, empty until one is chosen.
    pub fn available_spots(&self) -> &[TouristSpot] {
        match self.selection.destination_id {
            Some(id) => self.catalog.spots_of(id),
            None => &[],
        }
    }

    /// Hotels narrowed to the selected destination, or all of them while no
    /// destination is chosen.
    pub fn available_hotels(&self) -> Vec<&Hotel> {
        match self.selection.destination_id {
            Some(id) => self.catalog.hotels_for_destination(id),
            None => self.catalog.hotels.iter().collect(),
        }
    }

    /// Rooms of the selected hotel, empty until one is chosen.
    pub fn available_rooms(&self) -> &[RoomType] {
        self.selection
            .hotel_id
            .and_then(|id| self.catalog.hotel(id))
            .map(|h| h.rooms.as_slice())
            .unwrap_or(&[])
    }

    /// Price the current selection. Components that do not resolve against
    /// the catalog (or are simply not selected) contribute nothing.
    pub fn quote(&self) -> PriceBreakdown {
        let room_price = match (self.selection.hotel_id, self.selection.room_id) {
            (Some(hotel_id), Some(room_id)) => self
                .catalog
                .room(hotel_id, room_id)
                .map(|room| room.price)
                .unwrap_or(0.0),
            _ => 0.0,
        };
        let transport_price = self
            .selection
            .transport_id
            .and_then(|id| self.catalog.transport(id))
            .map(|t| t.price_per_day)
            .unwrap_or(0.0);
        let guide_price = self
            .selection
            .guide_id
            .and_then(|id| self.catalog.guide(id))
            .map(|g| g.price_per_day)
            .unwrap_or(0.0);

        PricingService::quote_custom_trip(
            self.selection.nights(),
            room_price,
            transport_price,
            guide_price,
        )
    }

    /// Send the assembled trip to the backend. Returns `true` on success.
    /// Validation and request failures leave an error message behind and
    /// keep the selection untouched so the traveler can retry.
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        if self.confirmation.is_some() {
            return true;
        }

        let (destination_id, start_date, end_date) = match (
            self.selection.destination_id,
            self.selection.start_date,
            self.selection.end_date,
        ) {
            (Some(dest), Some(start), Some(end)) if self.selection.nights() > 0 => {
                (dest, start, end)
            }
            _ => {
                self.submit_error = Some(INVALID_TRIP_MESSAGE.to_string());
                return false;
            }
        };

        self.submit_error = None;
        let quote = self.quote();

        let request = CustomPackageRequest {
            destination_id,
            spots: self.selection.spots.iter().cloned().collect(),
            transport_id: self.selection.transport_id,
            hotel_id: self.selection.hotel_id,
            room_id: self.selection.room_id,
            guide_id: self.selection.guide_id,
            guide_included: self.selection.guide_id.is_some(),
            start_date,
            end_date,
            adults: self.selection.adults,
            children: self.selection.children,
            estimated_cost: quote.grand_total,
        };

        match api.submit_custom_package(&request).await {
            Ok(()) => {
                self.confirmation = Some(TripConfirmation {
                    destination: self
                        .catalog
                        .destination(destination_id)
                        .map(|d| d.name.clone()),
                    nights: quote.nights,
                    estimated_cost: quote.grand_total,
                });
                true
            }
            Err(err) => {
                log::error!("Custom package submission failed: {}", err);
                self.submit_error = Some(
                    err.server_message()
                        .unwrap_or(SUBMIT_FALLBACK_MESSAGE)
                        .to_string(),
                );
                false
            }
        }
    }
}

impl Default for TripPlanner {
    fn default() -> Self {
        TripPlanner::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_planner() -> TripPlanner {
        let mut planner = TripPlanner::new();
        planner.set_destinations(vec![
            Destination {
                destination_id: 1,
                name: "Cox's Bazar".to_string(),
                description: None,
                image: None,
                spots: vec![
                    TouristSpot {
                        name: "Inani Beach".to_string(),
                        description: None,
                        image: None,
                    },
                    TouristSpot {
                        name: "Himchari".to_string(),
                        description: None,
                        image: None,
                    },
                ],
            },
            Destination {
                destination_id: 2,
                name: "Bandarban".to_string(),
                description: None,
                image: None,
                spots: vec![],
            },
        ]);
        planner.set_transports(vec![
            TransportOption {
                transport_id: 4,
                vehicle_type: "Car".to_string(),
                model: Some("Toyota Axio".to_string()),
                capacity: 4,
                total_vehicles: 2,
                price_per_day: 500.0,
            },
            TransportOption {
                transport_id: 5,
                vehicle_type: "Microbus".to_string(),
                model: Some("Hiace".to_string()),
                capacity: 0,
                total_vehicles: 1,
                price_per_day: 900.0,
            },
        ]);
        planner.set_hotels(vec![
            Hotel {
                hotel_id: 2,
                name: "Sea Pearl".to_string(),
                location: "Inani, Cox's Bazar".to_string(),
                description: None,
                destination_id: None,
                rooms: vec![RoomType {
                    room_id: 9,
                    room_type: "Deluxe".to_string(),
                    total_rooms: 10,
                    price: 1000.0,
                }],
            },
            Hotel {
                hotel_id: 8,
                name: "Hill View".to_string(),
                location: "Bandarban town".to_string(),
                description: None,
                destination_id: Some(2),
                rooms: vec![],
            },
        ]);
        planner.set_guides(vec![Guide {
            guide_id: 5,
            full_name: "Karim Mia".to_string(),
            experience: 6,
            price_per_day: 800.0,
        }]);
        planner
    }

    #[test]
    fn test_loading_flags_clear_as_lists_arrive() {
        let mut planner = TripPlanner::new();
        assert!(planner.loading().any());

        planner.set_destinations(vec![]);
        planner.set_transports(vec![]);
        planner.set_hotels(vec![]);
        assert!(planner.loading().any());

        planner.set_guides(vec![]);
        assert!(!planner.loading().any());
    }

    #[test]
    fn test_transport_capacity_guard() {
        let mut planner = seeded_planner();
        planner.set_travelers(4, 1);

        // Five travelers do not fit a four-seat car
        assert!(!planner.select_transport(4));
        assert!(planner.selection().transport_id.is_none());

        planner.set_travelers(3, 1);
        assert!(planner.select_transport(4));
        assert_eq!(planner.selection().transport_id, Some(4));
    }

    #[test]
    fn test_unknown_capacity_never_blocks() {
        let mut planner = seeded_planner();
        planner.set_travelers(10, 5);

        assert!(planner.select_transport(5));
        assert_eq!(planner.selection().transport_id, Some(5));
    }

    #[test]
    fn test_room_requires_matching_hotel() {
        let mut planner = seeded_planner();

        // No hotel selected yet
        assert!(planner.available_rooms().is_empty());
        assert!(!planner.select_room(9));

        planner.select_hotel(8);
        // Room 9 belongs to hotel 2, not hotel 8
        assert!(!planner.select_room(9));
        assert!(planner.selection().room_id.is_none());

        planner.select_hotel(8);
        planner.select_hotel(2);
        assert_eq!(planner.available_rooms().len(), 1);
        assert!(planner.select_room(9));
        assert_eq!(planner.selection().room_id, Some(9));
    }

    #[test]
    fn test_hotels_narrow_to_destination() {
        let mut planner = seeded_planner();
        assert_eq!(planner.available_hotels().len(), 2);

        // Location text match
        planner.select_destination(Some(1));
        let hotels: Vec<i64> = planner.available_hotels().iter().map(|h| h.hotel_id).collect();
        assert_eq!(hotels, vec![2]);

        // Explicit destination link
        planner.select_destination(Some(2));
        let hotels: Vec<i64> = planner.available_hotels().iter().map(|h| h.hotel_id).collect();
        assert_eq!(hotels, vec![8]);
    }

    #[test]
    fn test_spots_follow_destination() {
        let mut planner = seeded_planner();
        assert!(planner.available_spots().is_empty());

        planner.select_destination(Some(1));
        assert_eq!(planner.available_spots().len(), 2);

        planner.select_destination(Some(2));
        assert!(planner.available_spots().is_empty());
    }

    #[test]
    fn test_quote_prices_selected_components() {
        let mut planner = seeded_planner();
        planner.set_date_range(Some(date(2025, 6, 1)), Some(date(2025, 6, 4)));
        planner.select_destination(Some(1));
        planner.select_hotel(2);
        assert!(planner.select_room(9));
        assert!(planner.select_transport(4));

        // 3 nights: room 1000/night + vehicle 500/day, no guide
        let quote = planner.quote();
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.hotel_cost, 3000.0);
        assert_eq!(quote.vehicle_cost, 1500.0);
        assert_eq!(quote.guide_cost, 0.0);
        assert_eq!(quote.grand_total, 4500.0);

        // Deselecting the hotel drops its cost from the next quote
        planner.select_hotel(2);
        let quote = planner.quote();
        assert_eq!(quote.hotel_cost, 0.0);
        assert_eq!(quote.grand_total, 1500.0);
    }

    #[test]
    fn test_stale_selection_prices_to_zero() {
        let mut planner = seeded_planner();
        planner.set_date_range(Some(date(2025, 6, 1)), Some(date(2025, 6, 4)));
        planner.select_hotel(2);
        assert!(planner.select_room(9));
        assert!(planner.select_transport(4));
        assert_eq!(planner.quote().grand_total, 4500.0);

        // A catalog refresh drops the chosen entries; the selection survives
        // but no longer contributes to the quote.
        planner.set_hotels(vec![]);
        planner.set_transports(vec![]);

        assert_eq!(planner.selection().hotel_id, Some(2));
        assert_eq!(planner.selection().room_id, Some(9));
        assert_eq!(planner.selection().transport_id, Some(4));

        let quote = planner.quote();
        assert_eq!(quote.hotel_cost, 0.0);
        assert_eq!(quote.vehicle_cost, 0.0);
        assert_eq!(quote.grand_total, 0.0);
    }

    #[test]
    fn test_quote_is_pure() {
        let mut planner = seeded_planner();
        planner.set_date_range(Some(date(2025, 6, 1)), Some(date(2025, 6, 4)));
        planner.select_destination(Some(1));
        planner.select_hotel(2);
        planner.select_room(9);

        let first = planner.quote();
        let second = planner.quote();
        assert_eq!(first, second);
    }
}
