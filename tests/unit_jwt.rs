use hostelhub::config::jwt::JwtConfig;
use hostelhub::modules::users::model::Role;
use hostelhub::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-for-unit-tests".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_and_verify_round_trip() {
    let config = test_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "user@test.com", Role::Warden, &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "user@test.com");
    assert_eq!(claims.role, "WARDEN");
    assert!(claims.exp > claims.iat);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_role_claim_matches_role() {
    let config = test_config();

    let token = create_access_token(Uuid::new_v4(), "a@test.com", Role::Admin, &config).unwrap();
    assert_eq!(verify_token(&token, &config).unwrap().role, "ADMIN");

    let token = create_access_token(Uuid::new_v4(), "s@test.com", Role::Student, &config).unwrap();
    assert_eq!(verify_token(&token, &config).unwrap().role, "STUDENT");
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let config = test_config();
    let other_config = JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: 3600,
    };

    let token = create_access_token(Uuid::new_v4(), "user@test.com", Role::Admin, &config).unwrap();

    assert!(verify_token(&token, &other_config).is_err());
}

#[test]
fn test_verify_rejects_tampered_token() {
    let config = test_config();

    let token =
        create_access_token(Uuid::new_v4(), "user@test.com", Role::Student, &config).unwrap();
    let mut tampered = token.clone();
    tampered.pop();

    assert!(verify_token(&tampered, &config).is_err());
}

#[test]
fn test_verify_rejects_garbage() {
    let config = test_config();

    assert!(verify_token("not-a-jwt", &config).is_err());
    assert!(verify_token("", &config).is_err());
}
