use crate::{
    modules::rooms::model::{CreateRoomDto, Room, UpdateRoomDto},
    utils::errors::AppError,
};
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct RoomService;

impl RoomService {
    #[instrument(skip(db, dto))]
    pub async fn create_room(db: &PgPool, dto: CreateRoomDto) -> Result<Room, AppError> {
        if dto.current_occupancy > dto.capacity {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "current_occupancy cannot exceed capacity"
            )));
        }

        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (hostel_id, room_number, capacity, current_occupancy, is_available)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, hostel_id, room_number, capacity, current_occupancy, is_available
            "#,
        )
        .bind(dto.hostel_id)
        .bind(&dto.room_number)
        .bind(dto.capacity)
        .bind(dto.current_occupancy)
        .bind(dto.is_available)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Hostel does not exist"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(room)
    }

    #[instrument(skip(db))]
    pub async fn get_rooms(db: &PgPool, hostel_id: Option<Uuid>) -> Result<Vec<Room>, AppError> {
        let rooms = match hostel_id {
            Some(hostel_id) => {
                sqlx::query_as::<_, Room>(
                    r#"
                    SELECT id, hostel_id, room_number, capacity, current_occupancy, is_available
                    FROM rooms
                    WHERE hostel_id = $1
                    ORDER BY room_number
                    "#,
                )
                .bind(hostel_id)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, Room>(
                    r#"
                    SELECT id, hostel_id, room_number, capacity, current_occupancy, is_available
                    FROM rooms
                    ORDER BY room_number
                    "#,
                )
                .fetch_all(db)
                .await
            }
        }
        .context("Failed to fetch rooms")
        .map_err(AppError::database)?;

        Ok(rooms)
    }

    #[instrument(skip(db))]
    pub async fn get_room(db: &PgPool, id: Uuid) -> Result<Room, AppError> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, hostel_id, room_number, capacity, current_occupancy, is_available
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch room by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Room not found")))?;

        Ok(room)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_room(db: &PgPool, id: Uuid, dto: UpdateRoomDto) -> Result<Room, AppError> {
        let existing = Self::get_room(db, id).await?;

        let room_number = dto.room_number.unwrap_or(existing.room_number);
        let capacity = dto.capacity.unwrap_or(existing.capacity);
        let current_occupancy = dto.current_occupancy.unwrap_or(existing.current_occupancy);
        let is_available = dto.is_available.unwrap_or(existing.is_available);

        if current_occupancy > capacity {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "current_occupancy cannot exceed capacity"
            )));
        }

        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET room_number = $1, capacity = $2, current_occupancy = $3, is_available = $4
            WHERE id = $5
            RETURNING id, hostel_id, room_number, capacity, current_occupancy, is_available
            "#,
        )
        .bind(&room_number)
        .bind(capacity)
        .bind(current_occupancy)
        .bind(is_available)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update room")
        .map_err(AppError::database)?;

        Ok(room)
    }

    #[instrument(skip(db))]
    pub async fn delete_room(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete room")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Room not found")));
        }

        Ok(())
    }
}
