use crate::{
    middleware::role::{Viewer, ViewerRole},
    modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto},
    modules::students::service::StudentService,
    utils::errors::AppError,
};
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct NoticeService;

impl NoticeService {
    /// Publish a notice authored by the caller. The hostel links are
    /// written in the same transaction as the notice row.
    #[instrument(skip(db, dto))]
    pub async fn create_notice(
        db: &PgPool,
        dto: CreateNoticeDto,
        created_by: Uuid,
    ) -> Result<Notice, AppError> {
        #[derive(sqlx::FromRow)]
        struct NoticeRow {
            id: Uuid,
            title: String,
            content: String,
            created_by: Uuid,
            created_at: chrono::DateTime<chrono::Utc>,
            is_for_all: bool,
        }

        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            INSERT INTO notices (title, content, created_by, is_for_all)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, created_by, created_at, is_for_all
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(created_by)
        .bind(dto.is_for_all)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert notice")
        .map_err(AppError::database)?;

        for hostel_id in &dto.hostel_ids {
            sqlx::query(
                r#"
                INSERT INTO notice_hostels (notice_id, hostel_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(hostel_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::bad_request(anyhow::anyhow!(
                            "Hostel {} does not exist",
                            hostel_id
                        ));
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;
        }

        tx.commit()
            .await
            .context("Failed to commit transaction")
            .map_err(AppError::database)?;

        let mut hostel_ids = dto.hostel_ids;
        hostel_ids.dedup();

        Ok(Notice {
            id: row.id,
            title: row.title,
            content: row.content,
            created_by: row.created_by,
            created_at: row.created_at,
            is_for_all: row.is_for_all,
            hostel_ids,
        })
    }

    /// List the notices visible to the viewer.
    ///
    /// Admins see everything. A student sees global notices plus those
    /// scoped to the hostel of their current room (global only when
    /// unassigned); no student record is 404. A warden sees global notices
    /// plus those scoped to any hostel they administer. Aggregation over
    /// the link table deduplicates a notice scoped to several matching
    /// hostels. Unrecognized roles see nothing.
    #[instrument(skip(db))]
    pub async fn get_notices(db: &PgPool, viewer: &Viewer) -> Result<Vec<Notice>, AppError> {
        let notices = match viewer.role {
            ViewerRole::Admin => {
                sqlx::query_as::<_, Notice>(
                    r#"
                    SELECT n.id, n.title, n.content, n.created_by, n.created_at, n.is_for_all,
                           array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                    FROM notices n
                    LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                    GROUP BY n.id
                    ORDER BY n.created_at DESC
                    "#,
                )
                .fetch_all(db)
                .await
            }
            ViewerRole::Student => {
                let student = StudentService::get_student(db, viewer.id).await?;
                let hostel_id = Self::hostel_of_room(db, student.room_id).await?;

                match hostel_id {
                    Some(hostel_id) => {
                        sqlx::query_as::<_, Notice>(
                            r#"
                            SELECT n.id, n.title, n.content, n.created_by, n.created_at,
                                   n.is_for_all,
                                   array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                            FROM notices n
                            LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                            WHERE n.is_for_all OR EXISTS (
                                SELECT 1 FROM notice_hostels x
                                WHERE x.notice_id = n.id AND x.hostel_id = $1
                            )
                            GROUP BY n.id
                            ORDER BY n.created_at DESC
                            "#,
                        )
                        .bind(hostel_id)
                        .fetch_all(db)
                        .await
                    }
                    None => {
                        sqlx::query_as::<_, Notice>(
                            r#"
                            SELECT n.id, n.title, n.content, n.created_by, n.created_at,
                                   n.is_for_all,
                                   array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                            FROM notices n
                            LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                            WHERE n.is_for_all
                            GROUP BY n.id
                            ORDER BY n.created_at DESC
                            "#,
                        )
                        .fetch_all(db)
                        .await
                    }
                }
            }
            ViewerRole::Warden => {
                sqlx::query_as::<_, Notice>(
                    r#"
                    SELECT n.id, n.title, n.content, n.created_by, n.created_at, n.is_for_all,
                           array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                    FROM notices n
                    LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                    WHERE n.is_for_all OR EXISTS (
                        SELECT 1 FROM notice_hostels x
                        JOIN hostels h ON h.id = x.hostel_id
                        WHERE x.notice_id = n.id AND h.warden_id = $1
                    )
                    GROUP BY n.id
                    ORDER BY n.created_at DESC
                    "#,
                )
                .bind(viewer.id)
                .fetch_all(db)
                .await
            }
            ViewerRole::Unknown => return Ok(Vec::new()),
        }
        .context("Failed to fetch notices")
        .map_err(AppError::database)?;

        Ok(notices)
    }

    /// Fetch one notice through the viewer's visibility.
    #[instrument(skip(db))]
    pub async fn get_notice(db: &PgPool, id: Uuid, viewer: &Viewer) -> Result<Notice, AppError> {
        let notice = match viewer.role {
            ViewerRole::Admin => {
                sqlx::query_as::<_, Notice>(
                    r#"
                    SELECT n.id, n.title, n.content, n.created_by, n.created_at, n.is_for_all,
                           array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                    FROM notices n
                    LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                    WHERE n.id = $1
                    GROUP BY n.id
                    "#,
                )
                .bind(id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Student => {
                let student = StudentService::get_student(db, viewer.id).await?;
                let hostel_id = Self::hostel_of_room(db, student.room_id).await?;

                match hostel_id {
                    Some(hostel_id) => {
                        sqlx::query_as::<_, Notice>(
                            r#"
                            SELECT n.id, n.title, n.content, n.created_by, n.created_at,
                                   n.is_for_all,
                                   array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                            FROM notices n
                            LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                            WHERE n.id = $1 AND (n.is_for_all OR EXISTS (
                                SELECT 1 FROM notice_hostels x
                                WHERE x.notice_id = n.id AND x.hostel_id = $2
                            ))
                            GROUP BY n.id
                            "#,
                        )
                        .bind(id)
                        .bind(hostel_id)
                        .fetch_optional(db)
                        .await
                    }
                    None => {
                        sqlx::query_as::<_, Notice>(
                            r#"
                            SELECT n.id, n.title, n.content, n.created_by, n.created_at,
                                   n.is_for_all,
                                   array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                            FROM notices n
                            LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                            WHERE n.id = $1 AND n.is_for_all
                            GROUP BY n.id
                            "#,
                        )
                        .bind(id)
                        .fetch_optional(db)
                        .await
                    }
                }
            }
            ViewerRole::Warden => {
                sqlx::query_as::<_, Notice>(
                    r#"
                    SELECT n.id, n.title, n.content, n.created_by, n.created_at, n.is_for_all,
                           array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
                    FROM notices n
                    LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
                    WHERE n.id = $1 AND (n.is_for_all OR EXISTS (
                        SELECT 1 FROM notice_hostels x
                        JOIN hostels h ON h.id = x.hostel_id
                        WHERE x.notice_id = n.id AND h.warden_id = $2
                    ))
                    GROUP BY n.id
                    "#,
                )
                .bind(id)
                .bind(viewer.id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Unknown => Ok(None),
        }
        .context("Failed to fetch notice by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notice not found")))?;

        Ok(notice)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_notice(
        db: &PgPool,
        id: Uuid,
        dto: UpdateNoticeDto,
        viewer: &Viewer,
    ) -> Result<Notice, AppError> {
        let existing = Self::get_notice(db, id, viewer).await?;

        let title = dto.title.unwrap_or(existing.title);
        let content = dto.content.unwrap_or(existing.content);
        let is_for_all = dto.is_for_all.unwrap_or(existing.is_for_all);

        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        sqlx::query(
            r#"
            UPDATE notices
            SET title = $1, content = $2, is_for_all = $3
            WHERE id = $4
            "#,
        )
        .bind(&title)
        .bind(&content)
        .bind(is_for_all)
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to update notice")
        .map_err(AppError::database)?;

        if let Some(hostel_ids) = &dto.hostel_ids {
            sqlx::query("DELETE FROM notice_hostels WHERE notice_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to clear notice hostels")
                .map_err(AppError::database)?;

            for hostel_id in hostel_ids {
                sqlx::query(
                    r#"
                    INSERT INTO notice_hostels (notice_id, hostel_id)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(id)
                .bind(hostel_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(db_err) = &e {
                        if db_err.is_foreign_key_violation() {
                            return AppError::bad_request(anyhow::anyhow!(
                                "Hostel {} does not exist",
                                hostel_id
                            ));
                        }
                    }
                    AppError::database(anyhow::Error::from(e))
                })?;
            }
        }

        tx.commit()
            .await
            .context("Failed to commit transaction")
            .map_err(AppError::database)?;

        // Re-read unscoped: the caller already proved visibility above, and
        // the update may have moved the notice out of their own scope.
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            SELECT n.id, n.title, n.content, n.created_by, n.created_at, n.is_for_all,
                   array_remove(array_agg(nh.hostel_id), NULL) AS hostel_ids
            FROM notices n
            LEFT JOIN notice_hostels nh ON nh.notice_id = n.id
            WHERE n.id = $1
            GROUP BY n.id
            "#,
        )
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to fetch updated notice")
        .map_err(AppError::database)?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn delete_notice(db: &PgPool, id: Uuid, viewer: &Viewer) -> Result<(), AppError> {
        let existing = Self::get_notice(db, id, viewer).await?;

        sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(existing.id)
            .execute(db)
            .await
            .context("Failed to delete notice")
            .map_err(AppError::database)?;

        Ok(())
    }

    async fn hostel_of_room(db: &PgPool, room_id: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
        let Some(room_id) = room_id else {
            return Ok(None);
        };

        let hostel_id = sqlx::query_scalar::<_, Uuid>("SELECT hostel_id FROM rooms WHERE id = $1")
            .bind(room_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch room's hostel")
            .map_err(AppError::database)?;

        Ok(hostel_id)
    }
}
