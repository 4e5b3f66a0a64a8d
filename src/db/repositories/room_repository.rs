use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewRoom, Room, RoomOccupancy, UpdateRoom};
use crate::db::DatabaseError;

const ROOM_COLUMNS: &str =
    "id, property_id, room_number, floor_number, capacity, rent_amount, created_at";

pub struct RoomRepository;

impl RoomRepository {
    pub async fn create(
        pool: &PgPool,
        property_id: Uuid,
        room: &NewRoom,
    ) -> Result<Room, DatabaseError> {
        let room = sqlx::query_as::<_, Room>(&format!(
            "INSERT INTO rooms (property_id, room_number, floor_number, capacity, rent_amount)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ROOM_COLUMNS}"
        ))
        .bind(property_id)
        .bind(&room.room_number)
        .bind(room.floor_number)
        .bind(room.capacity)
        .bind(room.rent_amount)
        .fetch_one(pool)
        .await?;

        Ok(room)
    }

    /// The room only if it belongs to one of the owner's properties —
    /// the ownership check for room mutations.
    pub async fn find_owned(
        pool: &PgPool,
        owner_id: Uuid,
        room_id: Uuid,
    ) -> Result<Option<Room>, DatabaseError> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT r.id, r.property_id, r.room_number, r.floor_number, r.capacity,
                   r.rent_amount, r.created_at
            FROM rooms r
            JOIN properties p ON r.property_id = p.id
            WHERE r.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(room_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(room)
    }

    pub async fn find_by_number(
        pool: &PgPool,
        owner_id: Uuid,
        room_number: &str,
    ) -> Result<Option<Room>, DatabaseError> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT r.id, r.property_id, r.room_number, r.floor_number, r.capacity,
                   r.rent_amount, r.created_at
            FROM rooms r
            JOIN properties p ON r.property_id = p.id
            WHERE p.owner_id = $1 AND r.room_number = $2
            "#,
        )
        .bind(owner_id)
        .bind(room_number)
        .fetch_optional(pool)
        .await?;

        Ok(room)
    }

    pub async fn update(pool: &PgPool, update: &UpdateRoom) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE rooms
            SET room_number = $1, floor_number = $2, capacity = $3, rent_amount = $4
            WHERE id = $5
            "#,
        )
        .bind(&update.room_number)
        .bind(update.floor_number)
        .bind(update.capacity)
        .bind(update.rent_amount)
        .bind(update.room_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Rooms of a property with their live occupant counts. DRAFT
    /// entries hold a bed here so the picker never oversells a room.
    pub async fn list_with_occupancy(
        pool: &PgPool,
        property_id: Uuid,
    ) -> Result<Vec<RoomOccupancy>, DatabaseError> {
        let rooms = sqlx::query_as::<_, RoomOccupancy>(
            r#"
            SELECT r.id, r.room_number, r.floor_number, r.capacity, r.rent_amount,
                   (SELECT COUNT(*) FROM tenants t
                    WHERE t.room_id = r.id
                      AND t.onboarding_status IN ('ACTIVE', 'PENDING', 'NOTICE', 'DRAFT')
                   ) AS occupants
            FROM rooms r
            WHERE r.property_id = $1
            ORDER BY r.room_number
            "#,
        )
        .bind(property_id)
        .fetch_all(pool)
        .await?;

        Ok(rooms)
    }

    /// Total bed capacity across all of the owner's properties.
    pub async fn total_capacity(pool: &PgPool, owner_id: Uuid) -> Result<i64, DatabaseError> {
        let capacity = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(capacity), 0)::BIGINT
            FROM rooms
            WHERE property_id IN (SELECT id FROM properties WHERE owner_id = $1)
            "#,
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(capacity)
    }
}
