mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_hostel, create_test_notice, create_test_room, create_test_student,
    create_test_user, generate_unique_email, generate_unique_roll_number,
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

async fn list_notices(app: axum::Router, token: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri("/api/notices")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value =
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, body)
}

fn ids(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_sees_global_and_own_hostel(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let password = "testpass123";

    let admin = create_test_user(&mut tx, &generate_unique_email(), password, Role::Admin).await;

    let hostel_h = create_test_hostel(&mut tx, "Hostel H", None).await;
    let hostel_other = create_test_hostel(&mut tx, "Other Hostel", None).await;
    let room_h = create_test_room(&mut tx, hostel_h, "H-1").await;

    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, password, Role::Student).await;
    create_test_student(&mut tx, user.id, &generate_unique_roll_number(), Some(room_h)).await;

    let global = create_test_notice(&mut tx, admin.id, "Global notice", true, &[]).await;
    let for_h = create_test_notice(&mut tx, admin.id, "For hostel H", false, &[hostel_h]).await;
    let for_other =
        create_test_notice(&mut tx, admin.id, "For other hostel", false, &[hostel_other]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let (status, body) = list_notices(setup_test_app(pool.clone()).await, &token).await;
    assert_eq!(status, StatusCode::OK);

    let notice_ids = ids(&body);
    assert_eq!(notice_ids.len(), 2);
    assert!(notice_ids.contains(&global.to_string()));
    assert!(notice_ids.contains(&for_h.to_string()));
    assert!(!notice_ids.contains(&for_other.to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_without_room_sees_only_global(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let password = "testpass123";

    let admin = create_test_user(&mut tx, &generate_unique_email(), password, Role::Admin).await;
    let hostel = create_test_hostel(&mut tx, "Hostel H", None).await;

    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, password, Role::Student).await;
    create_test_student(&mut tx, user.id, &generate_unique_roll_number(), None).await;

    let global = create_test_notice(&mut tx, admin.id, "Global notice", true, &[]).await;
    create_test_notice(&mut tx, admin.id, "Hostel-scoped", false, &[hostel]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let (status, body) = list_notices(setup_test_app(pool.clone()).await, &token).await;
    assert_eq!(status, StatusCode::OK);

    let notice_ids = ids(&body);
    assert_eq!(notice_ids, vec![global.to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_without_record_fails_not_found(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let password = "testpass123";
    create_test_user(&mut tx, &email, password, Role::Student).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let (status, _) = list_notices(setup_test_app(pool.clone()).await, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_warden_sees_administered_hostels_deduplicated(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let password = "testpass123";

    let admin = create_test_user(&mut tx, &generate_unique_email(), password, Role::Admin).await;

    let warden_email = generate_unique_email();
    let warden = create_test_user(&mut tx, &warden_email, password, Role::Warden).await;

    let h1 = create_test_hostel(&mut tx, "H1", Some(warden.id)).await;
    let h2 = create_test_hostel(&mut tx, "H2", Some(warden.id)).await;
    let h3 = create_test_hostel(&mut tx, "H3", None).await;

    let global = create_test_notice(&mut tx, admin.id, "Global notice", true, &[]).await;
    // scoped to two hostels the warden administers: must appear exactly once
    let both = create_test_notice(&mut tx, admin.id, "For H1 and H2", false, &[h1, h2]).await;
    let only_h3 = create_test_notice(&mut tx, admin.id, "For H3", false, &[h3]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &warden_email, password).await;

    let (status, body) = list_notices(setup_test_app(pool.clone()).await, &token).await;
    assert_eq!(status, StatusCode::OK);

    let notice_ids = ids(&body);
    assert_eq!(notice_ids.len(), 2);
    assert!(notice_ids.contains(&global.to_string()));
    assert!(!notice_ids.contains(&only_h3.to_string()));

    let occurrences = notice_ids.iter().filter(|id| **id == both.to_string()).count();
    assert_eq!(occurrences, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_sees_all_notices(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let password = "testpass123";
    let admin_email = generate_unique_email();
    let admin = create_test_user(&mut tx, &admin_email, password, Role::Admin).await;

    let hostel = create_test_hostel(&mut tx, "Hostel H", None).await;
    create_test_notice(&mut tx, admin.id, "Global", true, &[]).await;
    create_test_notice(&mut tx, admin.id, "Scoped", false, &[hostel]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, password).await;

    let (status, body) = list_notices(setup_test_app(pool.clone()).await, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_notice_sets_author_and_hostels(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let password = "testpass123";
    let admin_email = generate_unique_email();
    let admin = create_test_user(&mut tx, &admin_email, password, Role::Admin).await;
    let hostel = create_test_hostel(&mut tx, "Hostel H", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/notices")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "Pest control",
                "content": "Hostel H closed Saturday morning",
                "is_for_all": false,
                "hostel_ids": [hostel]
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["created_by"], admin.id.to_string());
    assert_eq!(body["is_for_all"], false);
    assert_eq!(body["hostel_ids"], json!([hostel.to_string()]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_fetch_foreign_hostel_notice(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let password = "testpass123";

    let admin = create_test_user(&mut tx, &generate_unique_email(), password, Role::Admin).await;
    let hostel_other = create_test_hostel(&mut tx, "Other Hostel", None).await;

    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, password, Role::Student).await;
    create_test_student(&mut tx, user.id, &generate_unique_roll_number(), None).await;

    let foreign =
        create_test_notice(&mut tx, admin.id, "Not for you", false, &[hostel_other]).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, password).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/notices/{}", foreign))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
