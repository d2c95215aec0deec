use crate::{
    modules::hostels::model::{CreateHostelDto, Hostel, UpdateHostelDto},
    utils::errors::AppError,
};
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct HostelService;

impl HostelService {
    #[instrument(skip(db, dto))]
    pub async fn create_hostel(db: &PgPool, dto: CreateHostelDto) -> Result<Hostel, AppError> {
        let hostel = sqlx::query_as::<_, Hostel>(
            r#"
            INSERT INTO hostels (name, location, total_rooms, available_rooms, warden_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, location, total_rooms, available_rooms, warden_id
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.location)
        .bind(dto.total_rooms)
        .bind(dto.available_rooms)
        .bind(dto.warden_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Warden does not exist"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(hostel)
    }

    #[instrument(skip(db))]
    pub async fn get_hostels(db: &PgPool) -> Result<Vec<Hostel>, AppError> {
        let hostels = sqlx::query_as::<_, Hostel>(
            r#"
            SELECT id, name, location, total_rooms, available_rooms, warden_id
            FROM hostels
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch hostels")
        .map_err(AppError::database)?;

        Ok(hostels)
    }

    #[instrument(skip(db))]
    pub async fn get_hostel(db: &PgPool, id: Uuid) -> Result<Hostel, AppError> {
        let hostel = sqlx::query_as::<_, Hostel>(
            r#"
            SELECT id, name, location, total_rooms, available_rooms, warden_id
            FROM hostels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch hostel by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Hostel not found")))?;

        Ok(hostel)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_hostel(
        db: &PgPool,
        id: Uuid,
        dto: UpdateHostelDto,
    ) -> Result<Hostel, AppError> {
        let existing = Self::get_hostel(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let location = dto.location.unwrap_or(existing.location);
        let total_rooms = dto.total_rooms.unwrap_or(existing.total_rooms);
        let available_rooms = dto.available_rooms.unwrap_or(existing.available_rooms);
        let warden_id = dto.warden_id.or(existing.warden_id);

        let hostel = sqlx::query_as::<_, Hostel>(
            r#"
            UPDATE hostels
            SET name = $1, location = $2, total_rooms = $3, available_rooms = $4,
                warden_id = $5
            WHERE id = $6
            RETURNING id, name, location, total_rooms, available_rooms, warden_id
            "#,
        )
        .bind(&name)
        .bind(&location)
        .bind(total_rooms)
        .bind(available_rooms)
        .bind(warden_id)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update hostel")
        .map_err(AppError::database)?;

        Ok(hostel)
    }

    #[instrument(skip(db))]
    pub async fn delete_hostel(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hostels WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete hostel")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Hostel not found")));
        }

        Ok(())
    }
}
