use crate::{
    middleware::role::{Viewer, ViewerRole, check_any_role},
    modules::leave_requests::model::{
        CreateLeaveRequestDto, LeaveRequest, LeaveStatus, UpdateLeaveRequestDto,
    },
    modules::students::service::StudentService,
    utils::errors::AppError,
};
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct LeaveRequestService;

impl LeaveRequestService {
    /// File a leave request. Student callers always file for their own
    /// record; other callers must name the student. New requests start
    /// PENDING with no approver.
    #[instrument(skip(db, dto))]
    pub async fn create_leave_request(
        db: &PgPool,
        dto: CreateLeaveRequestDto,
        viewer: &Viewer,
    ) -> Result<LeaveRequest, AppError> {
        if dto.end_date < dto.start_date {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "end_date cannot be before start_date"
            )));
        }

        let student_id = match viewer.role {
            ViewerRole::Student => StudentService::get_student(db, viewer.id).await?.user_id,
            _ => dto.student_id.ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("student_id is required"))
            })?,
        };

        let leave_request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            INSERT INTO leave_requests (student_id, start_date, end_date, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, start_date, end_date, reason, status, approved_by
            "#,
        )
        .bind(student_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(&dto.reason)
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

        Ok(leave_request)
    }

    /// List the leave requests the viewer may see. Scoping mirrors
    /// complaints: admins unrestricted, students their own rows (404
    /// without a student record), wardens the rows of students housed in
    /// their hostels, unrecognized roles nothing.
    #[instrument(skip(db))]
    pub async fn get_leave_requests(
        db: &PgPool,
        viewer: &Viewer,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        let leave_requests = match viewer.role {
            ViewerRole::Admin => {
                sqlx::query_as::<_, LeaveRequest>(
                    r#"
                    SELECT id, student_id, start_date, end_date, reason, status, approved_by
                    FROM leave_requests
                    ORDER BY start_date DESC
                    "#,
                )
                .fetch_all(db)
                .await
            }
            ViewerRole::Student => {
                let student = StudentService::get_student(db, viewer.id).await?;

                sqlx::query_as::<_, LeaveRequest>(
                    r#"
                    SELECT id, student_id, start_date, end_date, reason, status, approved_by
                    FROM leave_requests
                    WHERE student_id = $1
                    ORDER BY start_date DESC
                    "#,
                )
                .bind(student.user_id)
                .fetch_all(db)
                .await
            }
            ViewerRole::Warden => {
                sqlx::query_as::<_, LeaveRequest>(
                    r#"
                    SELECT l.id, l.student_id, l.start_date, l.end_date, l.reason,
                           l.status, l.approved_by
                    FROM leave_requests l
                    JOIN students s ON s.user_id = l.student_id
                    JOIN rooms r ON r.id = s.room_id
                    JOIN hostels h ON h.id = r.hostel_id
                    WHERE h.warden_id = $1
                    ORDER BY l.start_date DESC
                    "#,
                )
                .bind(viewer.id)
                .fetch_all(db)
                .await
            }
            ViewerRole::Unknown => return Ok(Vec::new()),
        }
        .context("Failed to fetch leave requests")
        .map_err(AppError::database)?;

        Ok(leave_requests)
    }

    /// Fetch one leave request through the viewer's scope.
    #[instrument(skip(db))]
    pub async fn get_leave_request(
        db: &PgPool,
        id: Uuid,
        viewer: &Viewer,
    ) -> Result<LeaveRequest, AppError> {
        let leave_request = match viewer.role {
            ViewerRole::Admin => {
                sqlx::query_as::<_, LeaveRequest>(
                    r#"
                    SELECT id, student_id, start_date, end_date, reason, status, approved_by
                    FROM leave_requests
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Student => {
                let student = StudentService::get_student(db, viewer.id).await?;

                sqlx::query_as::<_, LeaveRequest>(
                    r#"
                    SELECT id, student_id, start_date, end_date, reason, status, approved_by
                    FROM leave_requests
                    WHERE id = $1 AND student_id = $2
                    "#,
                )
                .bind(id)
                .bind(student.user_id)
                .fetch_optional(db)
                .await
            }
            ViewerRole::Warden => {
                sqlx::query_as::<_, LeaveRequest>(
                    r#"
                    SELECT l.id, l.student_id, l.start_date, l.end_date, l.reason,
                           l.status, l.approved_by
                    FROM leave_requests l
                    WHERE l.id = $1 AND EXISTS (
                        SELECT 1
                        FROM students s
                        JOIN rooms r ON r.id = s.room_id
                        JOIN hostels h ON h.id = r.hostel_id
                        WHERE s.user_id = l.student_id AND h.warden_id = $2
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
        .context("Failed to fetch leave request by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Leave request not found")))?;

        Ok(leave_request)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_leave_request(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLeaveRequestDto,
        viewer: &Viewer,
    ) -> Result<LeaveRequest, AppError> {
        let existing = Self::get_leave_request(db, id, viewer).await?;

        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let end_date = dto.end_date.unwrap_or(existing.end_date);
        let reason = dto.reason.unwrap_or(existing.reason);

        if end_date < start_date {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "end_date cannot be before start_date"
            )));
        }

        let leave_request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            UPDATE leave_requests
            SET start_date = $1, end_date = $2, reason = $3
            WHERE id = $4
            RETURNING id, student_id, start_date, end_date, reason, status, approved_by
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(&reason)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update leave request")
        .map_err(AppError::database)?;

        Ok(leave_request)
    }

    #[instrument(skip(db))]
    pub async fn delete_leave_request(
        db: &PgPool,
        id: Uuid,
        viewer: &Viewer,
    ) -> Result<(), AppError> {
        let existing = Self::get_leave_request(db, id, viewer).await?;

        sqlx::query("DELETE FROM leave_requests WHERE id = $1")
            .bind(existing.id)
            .execute(db)
            .await
            .context("Failed to delete leave request")
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Move a PENDING request to APPROVED or REJECTED, recording the actor.
    ///
    /// Only admins and wardens may transition, and a warden only for
    /// students housed in a hostel they administer. Terminal states never
    /// transition again; the status guard on the UPDATE means concurrent
    /// calls resolve to one winner and one conflict.
    #[instrument(skip(db))]
    pub async fn transition(
        db: &PgPool,
        id: Uuid,
        viewer: &Viewer,
        new_status: LeaveStatus,
    ) -> Result<LeaveRequest, AppError> {
        check_any_role(viewer, &[ViewerRole::Admin, ViewerRole::Warden])?;

        let existing = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, student_id, start_date, end_date, reason, status, approved_by
            FROM leave_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch leave request by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Leave request not found")))?;

        if viewer.role == ViewerRole::Warden {
            let in_scope = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM students s
                    JOIN rooms r ON r.id = s.room_id
                    JOIN hostels h ON h.id = r.hostel_id
                    WHERE s.user_id = $1 AND h.warden_id = $2
                )
                "#,
            )
            .bind(existing.student_id)
            .bind(viewer.id)
            .fetch_one(db)
            .await
            .context("Failed to check warden scope")
            .map_err(AppError::database)?;

            if !in_scope {
                return Err(AppError::forbidden(anyhow::anyhow!("Permission denied")));
            }
        }

        if existing.status != LeaveStatus::Pending {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Leave request has already been decided"
            )));
        }

        let leave_request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            UPDATE leave_requests
            SET status = $1, approved_by = $2
            WHERE id = $3 AND status = 'PENDING'
            RETURNING id, student_id, start_date, end_date, reason, status, approved_by
            "#,
        )
        .bind(new_status)
        .bind(viewer.id)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to transition leave request")
        .map_err(AppError::database)?
        .ok_or_else(|| {
            // A concurrent transition got there first.
            AppError::conflict(anyhow::anyhow!("Leave request has already been decided"))
        })?;

        Ok(leave_request)
    }
}
