use hostelhub::modules::users::model::Role;
use hostelhub::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    role: Role,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (email, password, first_name, last_name, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(&hashed)
    .bind("Test")
    .bind("User")
    .bind(role)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_hostel(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    warden_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO hostels (name, location, total_rooms, available_rooms, warden_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind("Test Campus")
    .bind(20)
    .bind(10)
    .bind(warden_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_room(
    tx: &mut Transaction<'_, Postgres>,
    hostel_id: Uuid,
    room_number: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO rooms (hostel_id, room_number, capacity, current_occupancy)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(hostel_id)
    .bind(room_number)
    .bind(4)
    .bind(1)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_student(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    roll_number: &str,
    room_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO students (user_id, roll_number, department, year, room_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING user_id
        "#,
    )
    .bind(user_id)
    .bind(roll_number)
    .bind("Computer Science")
    .bind(2)
    .bind(room_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_complaint(
    tx: &mut Transaction<'_, Postgres>,
    student_id: Uuid,
    title: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO complaints (student_id, title, description)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(student_id)
    .bind(title)
    .bind("Test complaint description")
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_leave_request(
    tx: &mut Transaction<'_, Postgres>,
    student_id: Uuid,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO leave_requests (student_id, start_date, end_date, reason)
        VALUES ($1, '2026-09-01', '2026-09-05', 'family visit')
        RETURNING id
        "#,
    )
    .bind(student_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_notice(
    tx: &mut Transaction<'_, Postgres>,
    created_by: Uuid,
    title: &str,
    is_for_all: bool,
    hostel_ids: &[Uuid],
) -> Uuid {
    let notice_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO notices (title, content, created_by, is_for_all)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind("Test notice content")
    .bind(created_by)
    .bind(is_for_all)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    for hostel_id in hostel_ids {
        sqlx::query("INSERT INTO notice_hostels (notice_id, hostel_id) VALUES ($1, $2)")
            .bind(notice_id)
            .bind(hostel_id)
            .execute(&mut **tx)
            .await
            .unwrap();
    }

    notice_id
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_roll_number() -> String {
    format!("ROLL-{}", Uuid::new_v4())
}
