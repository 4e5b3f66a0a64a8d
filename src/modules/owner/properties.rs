use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewRoom, Room, RoomOccupancy, UpdateRoom};
use crate::db::repositories::{PropertyRepository, RoomRepository};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;

use super::current_owner;

#[derive(Debug, Serialize)]
pub struct RoomView {
    pub id: Uuid,
    pub room_number: String,
    pub floor_number: Option<i32>,
    pub capacity: i32,
    pub rent_amount: i64,
    pub occupants: i64,
    pub occupancy_pct: i64,
}

impl From<RoomOccupancy> for RoomView {
    fn from(room: RoomOccupancy) -> Self {
        let occupancy_pct = room.occupancy_pct();
        RoomView {
            id: room.id,
            room_number: room.room_number,
            floor_number: room.floor_number,
            capacity: room.capacity,
            rent_amount: room.rent_amount,
            occupants: room.occupants,
            occupancy_pct,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyView {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub rooms: Vec<RoomView>,
}

pub async fn list_properties(
    State(state): State<AppState>,
    session: OwnerSession,
) -> AppResult<Json<Vec<PropertyView>>> {
    let owner = current_owner(&state.db, &session).await?;
    let properties = PropertyRepository::list_by_owner(&state.db, owner.id).await?;

    let mut views = Vec::with_capacity(properties.len());
    for property in properties {
        let rooms = RoomRepository::list_with_occupancy(&state.db, property.id)
            .await?
            .into_iter()
            .map(RoomView::from)
            .collect();
        views.push(PropertyView {
            id: property.id,
            name: property.name,
            address: property.address,
            rooms,
        });
    }

    Ok(Json(views))
}

/// Rooms with at least one free bed, for the add-tenant picker.
pub async fn available_rooms(
    State(state): State<AppState>,
    session: OwnerSession,
) -> AppResult<Json<Vec<RoomView>>> {
    let owner = current_owner(&state.db, &session).await?;
    let properties = PropertyRepository::list_by_owner(&state.db, owner.id).await?;

    let mut available = Vec::new();
    for property in properties {
        for room in RoomRepository::list_with_occupancy(&state.db, property.id).await? {
            if room.available_beds() > 0 {
                available.push(RoomView::from(room));
            }
        }
    }

    Ok(Json(available))
}

/// Add a room, creating the owner's default property on first use.
pub async fn add_room(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<NewRoom>,
) -> AppResult<Json<Room>> {
    req.validate()?;
    let owner = current_owner(&state.db, &session).await?;

    let property = match PropertyRepository::find_default(&state.db, owner.id).await? {
        Some(property) => property,
        None => PropertyRepository::create_default(&state.db, owner.id).await?,
    };

    let room = RoomRepository::create(&state.db, property.id, &req)
        .await
        .map_err(|e| match e {
            crate::db::DatabaseError::Duplicate => {
                AppError::Conflict("Room number already exists!".into())
            }
            other => other.into(),
        })?;

    Ok(Json(room))
}

pub async fn edit_room(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<UpdateRoom>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    let owner = current_owner(&state.db, &session).await?;

    RoomRepository::find_owned(&state.db, owner.id, req.room_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".into()))?;

    RoomRepository::update(&state.db, &req).await.map_err(|e| {
        if matches!(e, crate::db::DatabaseError::Duplicate) {
            AppError::Conflict("Room number already exists!".into())
        } else {
            e.into()
        }
    })?;

    Ok(Json(json!({ "success": true, "message": "Room details updated successfully!" })))
}
