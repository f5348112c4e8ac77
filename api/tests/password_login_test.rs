//! Integration tests for the password login endpoint

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use chrono::Utc;

use su_api::app::create_app;
use su_api::routes::AppState;
use su_core::domain::entities::user::{User, UserRole, UserStatus};
use su_core::services::auth::AuthService;
use su_core::services::guard::{InMemoryAttemptStore, SecurityGuard, SecurityGuardConfig};
use su_core::services::password::PasswordHasher;
use su_core::services::rbac::RolePermissionRegistry;
use su_core::services::sms::{InMemoryCodeStore, SmsLoginConfig, SmsLoginService};
use su_core::services::token::{TokenService, TokenServiceConfig};
use su_infra::repositories::{
    MockPermissionRepository, MockRevokedTokenRepository, MockUserRepository,
};
use su_infra::sms::MockSmsSender;

type TestState = AppState<
    MockUserRepository,
    InMemoryAttemptStore,
    MockRevokedTokenRepository,
    InMemoryCodeStore,
    MockPermissionRepository,
>;

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
const PHONE: &str = "13812340001";
const PASSWORD: &str = "correct-horse-battery";

fn test_user(phone: &str, password: &str, status: UserStatus) -> User {
    // Cost 4 is the bcrypt minimum and keeps the test suite quick
    let hash = bcrypt::hash(password, 4).unwrap();
    User {
        id: 0,
        phone: phone.to_string(),
        password_hash: Some(hash),
        name: "Test Student".to_string(),
        role: UserRole::Student,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn create_test_state(max_attempts: u32) -> (Arc<MockUserRepository>, web::Data<TestState>) {
    let user_repository = Arc::new(MockUserRepository::new());
    let revoked_repository = Arc::new(MockRevokedTokenRepository::new());
    let attempt_store = Arc::new(InMemoryAttemptStore::new());
    let code_store = Arc::new(InMemoryCodeStore::new());
    let sms_sender = Arc::new(MockSmsSender::new());

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new(TEST_SECRET)));

    let guard_config = SecurityGuardConfig {
        max_login_attempts: max_attempts,
        ..SecurityGuardConfig::default()
    };
    let security_guard = Arc::new(SecurityGuard::new(
        attempt_store,
        revoked_repository,
        guard_config,
    ));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&security_guard),
        Arc::clone(&token_service),
        PasswordHasher::new(4),
    ));

    let sms_service = Arc::new(SmsLoginService::new(
        Arc::clone(&user_repository),
        code_store,
        sms_sender,
        token_service,
        SmsLoginConfig::default(),
    ));

    let permissions = Arc::new(RolePermissionRegistry::new(Arc::new(
        MockPermissionRepository::with_defaults(),
    )));
    permissions.reload().await.unwrap();

    let state = web::Data::new(AppState {
        auth_service,
        sms_service,
        security_guard,
        permissions,
    });

    (user_repository, state)
}

#[actix_web::test]
async fn test_password_login_success() {
    let (users, state) = create_test_state(5).await;
    users.seed(test_user(PHONE, PASSWORD, UserStatus::Active)).await;

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login/password")
        .set_json(serde_json::json!({ "phone": PHONE, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().unwrap().contains('.'));
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role"], "student");
    assert!(body["expires_in"].as_i64().unwrap() > 0);
    assert!(body.get("is_new_user").is_none());
}

#[actix_web::test]
async fn test_wrong_password_and_unknown_phone_are_indistinguishable() {
    let (users, state) = create_test_state(5).await;
    users.seed(test_user(PHONE, PASSWORD, UserStatus::Active)).await;

    let app = test::init_service(create_app(state)).await;

    let wrong_password = test::TestRequest::post()
        .uri("/api/v1/login/password")
        .set_json(serde_json::json!({ "phone": PHONE, "password": "wrong" }))
        .to_request();
    let resp_wrong = test::call_service(&app, wrong_password).await;
    assert_eq!(resp_wrong.status(), StatusCode::UNAUTHORIZED);
    let body_wrong: serde_json::Value = test::read_body_json(resp_wrong).await;

    let unknown_phone = test::TestRequest::post()
        .uri("/api/v1/login/password")
        .set_json(serde_json::json!({ "phone": "13899999999", "password": "wrong" }))
        .to_request();
    let resp_unknown = test::call_service(&app, unknown_phone).await;
    assert_eq!(resp_unknown.status(), StatusCode::UNAUTHORIZED);
    let body_unknown: serde_json::Value = test::read_body_json(resp_unknown).await;

    assert_eq!(body_wrong["error"], "AUTHENTICATION_FAILED");
    assert_eq!(body_wrong["error"], body_unknown["error"]);
    assert_eq!(body_wrong["message"], body_unknown["message"]);
}

#[actix_web::test]
async fn test_lockout_after_repeated_failures() {
    let (users, state) = create_test_state(3).await;
    users.seed(test_user(PHONE, PASSWORD, UserStatus::Active)).await;

    let app = test::init_service(create_app(state)).await;

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/login/password")
            .set_json(serde_json::json!({ "phone": PHONE, "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    // The account is now locked; even the correct password is refused
    let req = test::TestRequest::post()
        .uri("/api/v1/login/password")
        .set_json(serde_json::json!({ "phone": PHONE, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::LOCKED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ACCOUNT_LOCKED");
    assert!(body["details"]["remaining_seconds"].as_i64().unwrap() > 0);
}

#[actix_web::test]
async fn test_suspended_account_is_rejected() {
    let (users, state) = create_test_state(5).await;
    users
        .seed(test_user(PHONE, PASSWORD, UserStatus::Suspended))
        .await;

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login/password")
        .set_json(serde_json::json!({ "phone": PHONE, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ACCOUNT_SUSPENDED");
}

#[actix_web::test]
async fn test_malformed_body_fails_validation() {
    let (_, state) = create_test_state(5).await;

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login/password")
        .set_json(serde_json::json!({ "phone": "123", "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("phone").is_some());
}
