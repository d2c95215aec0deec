mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_hostel, create_test_room, create_test_student, create_test_user,
    generate_unique_email, generate_unique_roll_number,
};
use hostelhub::config::cors::CorsConfig;
use hostelhub::config::jwt::JwtConfig;
use hostelhub::modules::users::model::Role;
use hostelhub::router::init_router;
use hostelhub::state::AppState;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    let password = "testpass123";
    create_test_user(&mut tx, &admin_email, password, Role::Admin).await;

    let student_user =
        create_test_user(&mut tx, &generate_unique_email(), password, Role::Student).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let roll_number = generate_unique_roll_number();
    let request = Request::builder()
        .method("POST")
        .uri("/api/students")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "user_id": student_user.id,
                "roll_number": roll_number,
                "department": "Physics",
                "year": 3
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["user_id"], student_user.id.to_string());
    assert_eq!(body["roll_number"], roll_number);
    assert!(body["room_id"].is_null());
    assert!(body.get("date_joined").is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_me(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let password = "testpass123";
    let user = create_test_user(&mut tx, &email, password, Role::Student).await;

    let hostel_id = create_test_hostel(&mut tx, "North Block", None).await;
    let room_id = create_test_room(&mut tx, hostel_id, "101").await;
    create_test_student(&mut tx, user.id, &generate_unique_roll_number(), Some(room_id)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/students/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["user_id"], user.id.to_string());
    assert_eq!(body["room_id"], room_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_me_not_found_without_record(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let password = "testpass123";
    // a STUDENT user without a student record
    create_test_user(&mut tx, &email, password, Role::Student).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/students/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_room_assignment(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    let password = "testpass123";
    create_test_user(&mut tx, &admin_email, password, Role::Admin).await;

    let student_user =
        create_test_user(&mut tx, &generate_unique_email(), password, Role::Student).await;
    let student_id =
        create_test_student(&mut tx, student_user.id, &generate_unique_roll_number(), None).await;

    let hostel_id = create_test_hostel(&mut tx, "South Block", None).await;
    let room_id = create_test_room(&mut tx, hostel_id, "202").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/students/{}", student_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "room_id": room_id
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["room_id"], room_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_room_unassigns_student(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let password = "testpass123";
    let user = create_test_user(&mut tx, &email, password, Role::Student).await;

    let hostel_id = create_test_hostel(&mut tx, "West Block", None).await;
    let room_id = create_test_room(&mut tx, hostel_id, "303").await;
    create_test_student(&mut tx, user.id, &generate_unique_roll_number(), Some(room_id)).await;
    tx.commit().await.unwrap();

    sqlx::query("DELETE FROM rooms WHERE id = $1")
        .bind(room_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/students/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["room_id"].is_null());
}
