use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub property_id: Uuid,
    pub room_number: String,
    pub floor_number: Option<i32>,
    pub capacity: i32,
    pub rent_amount: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewRoom {
    #[validate(length(min = 1, message = "Room number must not be empty"))]
    pub room_number: String,
    pub floor_number: Option<i32>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    #[validate(range(min = 0, message = "Rent cannot be negative"))]
    pub rent_amount: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoom {
    pub room_id: Uuid,
    #[validate(length(min = 1, message = "Room number must not be empty"))]
    pub room_number: String,
    pub floor_number: Option<i32>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    #[validate(range(min = 0, message = "Rent cannot be negative"))]
    pub rent_amount: i64,
}

/// Room with its current occupant count, for pickers and the
/// properties overview.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct RoomOccupancy {
    pub id: Uuid,
    pub room_number: String,
    pub floor_number: Option<i32>,
    pub capacity: i32,
    pub rent_amount: i64,
    pub occupants: i64,
}

impl RoomOccupancy {
    pub fn available_beds(&self) -> i64 {
        (self.capacity as i64 - self.occupants).max(0)
    }

    pub fn occupancy_pct(&self) -> i64 {
        if self.capacity > 0 {
            self.occupants * 100 / self.capacity as i64
        } else {
            0
        }
    }
}
