use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Hotel {
    pub hotel_id: i64,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub description: Option<String>,
    pub destination_id: Option<i64>,
    #[serde(rename = "HotelRooms", default)]
    pub rooms: Vec<RoomType>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RoomType {
    pub room_id: i64,
    pub room_type: String,
    #[serde(default)]
    pub total_rooms: u32,
    #[serde(default)]
    pub price: f64,
}

impl Hotel {
    pub fn room(&self, room_id: i64) -> Option<&RoomType> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }
}
