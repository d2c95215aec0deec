use crate::{
    modules::students::model::{CreateStudentDto, Student, UpdateStudentDto},
    utils::errors::AppError,
};
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (user_id, roll_number, department, year, room_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, roll_number, department, year, room_id, date_joined
            "#,
        )
        .bind(dto.user_id)
        .bind(&dto.roll_number)
        .bind(&dto.department)
        .bind(dto.year)
        .bind(dto.room_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Student record or roll number already exists"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("User or room does not exist"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT user_id, roll_number, department, year, room_id, date_joined
            FROM students
            ORDER BY roll_number
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, user_id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT user_id, roll_number, department, year, room_id, date_joined
            FROM students
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, user_id).await?;

        let roll_number = dto.roll_number.unwrap_or(existing.roll_number);
        let department = dto.department.unwrap_or(existing.department);
        let year = dto.year.unwrap_or(existing.year);
        let room_id = dto.room_id.or(existing.room_id);

        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET roll_number = $1, department = $2, year = $3, room_id = $4
            WHERE user_id = $5
            RETURNING user_id, roll_number, department, year, room_id, date_joined
            "#,
        )
        .bind(&roll_number)
        .bind(&department)
        .bind(year)
        .bind(room_id)
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Roll number {} already exists",
                        roll_number
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
