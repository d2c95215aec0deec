use crate::{
    middleware::role::{Viewer, ViewerRole},
    modules::complaints::model::{Complaint, CreateComplaintDto, UpdateComplaintDto},
    modules::students::service::StudentService,
    utils::errors::AppError,
};
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct ComplaintService;

impl ComplaintService {
    /// File a complaint. Student callers always file for their own record,
    /// whatever `student_id` the body carries; other callers must name the
    /// student.
    #[instrument(skip(db, dto))]
    pub async fn create_complaint(
        db: &PgPool,
        dto: CreateComplaintDto,
        viewer: &Viewer,
    ) -> Result<Complaint, AppError> {
        let student_id = match viewer.role {
            ViewerRole::Student => StudentService::get_student(db, viewer.id).await?.user_id,
            _ => dto.student_id.ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("student_id is required"))
            })?,
        };

        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints (student_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, title, description, status, created_at, resolved_at
            "#,
        )
        .bind(student_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Student does not exist"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(complaint)
    }

    /// List the complaints the viewer may see.
    ///
    /// Admins see everything. A student sees their own complaints and must
    /// have a student record (404 otherwise, never an empty success). A
    /// warden sees complaints of students whose room belongs to a hostel
    /// they administer, resolved in one join. Unrecognized roles see
    /// nothing.
    #[instrument(skip(db))]
    pub async fn get_complaints(db: &PgPool, viewer: &Viewer) -> Result<Vec<Complaint>, AppError> {
        let complaints = match viewer.role {
            ViewerRole::Admin => {
                sqlx::query_as::<_, Complaint>(
                    r#"
                    SELECT id, student_id, title, description, status, created_at, resolved_at
                    FROM complaints
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(db)
                .await
            }
            ViewerRole::Student => {
                let student = StudentService::get_student(db, viewer.id).await?;

                sqlx::query_as::<_, Complaint>(
                    r#"
                    SELECT id, student_id, title, description, status, created_at, resolved_at
                    FROM complaints
                    WHERE student_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(student.user_id)
                .fetch_all(db)
                .await
            }
            ViewerRole::Warden => {
                sqlx::query_as::<_, Complaint>(
                    r#"
                    SELECT c.id, c.student_id, c.title, c.description, c.status,
                           c.created_at, c.resolved_at
                    FROM complaints c
                    JOIN students s ON s.user_id = c.student_id
                    JOIN rooms r ON r.id = s.room_id
                    JOIN hostels h ON h.id = r.hostel_id
                    WHERE h.warden_id = $1
                    ORDER BY c.created_at DESC
                    "#,
                )
                .bind(viewer.id)
                .fetch_all(db)
                .await
            }
            ViewerRole::Unknown => return Ok(Vec::new()),
        }
        .context("Failed to fetch complaints")
        .map_err(AppError::database)?;

        Ok(complaints)
    }

    /// Fetch one complaint through the viewer's scope. A row outside the
    /// scope is indistinguishable from a missing one.
    #[instrument(skip(db))]
    pub async fn get_complaint(
        db: &PgPool,
        id: Uuid,
        viewer: &Viewer,
    ) -> Result<Complaint, AppError> {
        let complaint = match viewer.role {
            ViewerRole::Admin => {
                sqlx::query_as::<_, Complaint>(
                    r#"
                    SELECT id, student_id, title, description, status, created_at, resolved_at
                    FROM complaints
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Student => {
                let student = StudentService::get_student(db, viewer.id).await?;

                sqlx::query_as::<_, Complaint>(
                    r#"
                    SELECT id, student_id, title, description, status, created_at, resolved_at
                    FROM complaints
                    WHERE id = $1 AND student_id = $2
                    "#,
                )
                .bind(id)
                .bind(student.user_id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Warden => {
                sqlx::query_as::<_, Complaint>(
                    r#"
                    SELECT c.id, c.student_id, c.title, c.description, c.status,
                           c.created_at, c.resolved_at
                    FROM complaints c
                    WHERE c.id = $1 AND EXISTS (
                        SELECT 1
                        FROM students s
                        JOIN rooms r ON r.id = s.room_id
                        JOIN hostels h ON h.id = r.hostel_id
                        WHERE s.user_id = c.student_id AND h.warden_id = $2
                    )
                    "#,
                )
                .bind(id)
                .bind(viewer.id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Unknown => Ok(None),
        }
        .context("Failed to fetch complaint by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Complaint not found")))?;

        Ok(complaint)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_complaint(
        db: &PgPool,
        id: Uuid,
        dto: UpdateComplaintDto,
        viewer: &Viewer,
    ) -> Result<Complaint, AppError> {
        let existing = Self::get_complaint(db, id, viewer).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.unwrap_or(existing.description);
        let status = dto.status.unwrap_or(existing.status);
        let resolved_at = dto.resolved_at.or(existing.resolved_at);

        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            UPDATE complaints
            SET title = $1, description = $2, status = $3, resolved_at = $4
            WHERE id = $5
            RETURNING id, student_id, title, description, status, created_at, resolved_at
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(status)
        .bind(resolved_at)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update complaint")
        .map_err(AppError::database)?;

        Ok(complaint)
    }

    #[instrument(skip(db))]
    pub async fn delete_complaint(db: &PgPool, id: Uuid, viewer: &Viewer) -> Result<(), AppError> {
        let existing = Self::get_complaint(db, id, viewer).await?;

        sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(existing.id)
            .execute(db)
            .await
            .context("Failed to delete complaint")
            .map_err(AppError::database)?;

        Ok(())
    }
}
