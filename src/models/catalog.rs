use crate::models::destination::{Destination, TouristSpot};
use crate::models::guide::Guide;
use crate::models::hotel::{Hotel, RoomType};
use crate::models::transport::TransportOption;

/// Snapshot of the reference data a trip is assembled from. Lists arrive
/// independently, so any of them may still be empty while the rest are
/// already usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub destinations: Vec<Destination>,
    pub transports: Vec<TransportOption>,
    pub hotels: Vec<Hotel>,
    pub guides: Vec<Guide>,
}

impl Catalog {
    pub fn destination(&self, id: i64) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.destination_id == id)
    }

    pub fn transport(&self, id: i64) -> Option<&TransportOption> {
        self.transports.iter().find(|t| t.transport_id == id)
    }

    pub fn hotel(&self, id: i64) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.hotel_id == id)
    }

    pub fn guide(&self, id: i64) -> Option<&Guide> {
        self.guides.iter().find(|g| g.guide_id == id)
    }

    pub fn room(&self, hotel_id: i64, room_id: i64) -> Option<&RoomType> {
        self.hotel(hotel_id).and_then(|h| h.room(room_id))
    }

    pub fn spots_of(&self, destination_id: i64) -> &[TouristSpot] {
        self.destination(destination_id)
            .map(|d| d.spots.as_slice())
            .unwrap_or(&[])
    }

    /// Hotels serving a destination, matched either by an explicit link or by
    /// the destination name appearing in the hotel's free-form location.
    pub fn hotels_for_destination(&self, destination_id: i64) -> Vec<&Hotel> {
        let name = self
            .destination(destination_id)
            .map(|d| d.name.to_lowercase())
            .unwrap_or_default();

        self.hotels
            .iter()
            .filter(|h| {
                (!name.is_empty() && h.location.to_lowercase().contains(&name))
                    || h.destination_id == Some(destination_id)
            })
            .collect()
    }
}
