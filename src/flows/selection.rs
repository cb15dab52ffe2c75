use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::services::pricing::PricingService;

/// Everything the traveler has picked so far for a self-assembled trip.
///
/// The struct is a plain value: every transition consumes the old selection
/// and returns the next one, so callers can keep, compare or discard states
/// freely. Choices that depend on the destination (spots, hotel, room) are
/// dropped when the destination changes; transport and guide carry over.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSelection {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub destination_id: Option<i64>,
    pub spots: BTreeSet<String>,
    pub transport_id: Option<i64>,
    pub hotel_id: Option<i64>,
    pub room_id: Option<i64>,
    pub guide_id: Option<i64>,
}

impl Default for TripSelection {
    fn default() -> Self {
        TripSelection {
            start_date: None,
            end_date: None,
            adults: 2,
            children: 0,
            destination_id: None,
            spots: BTreeSet::new(),
            transport_id: None,
            hotel_id: None,
            room_id: None,
            guide_id: None,
        }
    }
}

impl TripSelection {
    pub fn new() -> Self {
        TripSelection::default()
    }

    pub fn nights(&self) -> u32 {
        PricingService::calculate_nights(self.start_date, self.end_date)
    }

    pub fn total_travelers(&self) -> u32 {
        self.adults + self.children
    }

    pub fn with_start_date(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = date;
        self
    }

    pub fn with_end_date(mut self, date: Option<NaiveDate>) -> Self {
        self.end_date = date;
        self
    }

    /// At least one adult must travel; children may be zero.
    pub fn with_travelers(mut self, adults: u32, children: u32) -> Self {
        self.adults = adults.max(1);
        self.children = children;
        self
    }

    /// Switch (or clear) the destination. Spots, hotel and room belong to the
    /// old destination and are dropped; transport and guide are kept.
    pub fn with_destination(mut self, destination_id: Option<i64>) -> Self {
        self.destination_id = destination_id;
        self.spots.clear();
        self.hotel_id = None;
        self.room_id = None;
        self
    }

    pub fn toggle_spot(mut self, name: &str) -> Self {
        if !self.spots.remove(name) {
            self.spots.insert(name.to_string());
        }
        self
    }

    pub fn toggle_transport(mut self, transport_id: i64) -> Self {
        if self.transport_id == Some(transport_id) {
            self.transport_id = None;
        } else {
            self.transport_id = Some(transport_id);
        }
        self
    }

    /// Selecting the current hotel again deselects it. Either way the room
    /// choice is reset, since rooms are scoped to one hotel.
    pub fn toggle_hotel(mut self, hotel_id: i64) -> Self {
        if self.hotel_id == Some(hotel_id) {
            self.hotel_id = None;
        } else {
            self.hotel_id = Some(hotel_id);
        }
        self.room_id = None;
        self
    }

    pub fn with_room(mut self, room_id: i64) -> Self {
        self.room_id = Some(room_id);
        self
    }

    pub fn toggle_guide(mut self, guide_id: i64) -> Self {
        if self.guide_id == Some(guide_id) {
            self.guide_id = None;
        } else {
            self.guide_id = Some(guide_id);
        }
        self
    }
}
