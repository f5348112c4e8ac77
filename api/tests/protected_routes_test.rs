//! Integration tests for the JWT-guarded routes and role checks

use std::sync::Arc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, HttpResponse};
use chrono::{Duration, Utc};

use su_api::app::create_app;
use su_api::routes::AppState;
use su_core::domain::entities::user::{User, UserRole, UserStatus};
use su_core::repositories::RevokedTokenRepository;
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

struct RouteHarness {
    users: Arc<MockUserRepository>,
    revoked: Arc<MockRevokedTokenRepository>,
    token_service: Arc<TokenService>,
    state: web::Data<TestState>,
}

async fn create_route_harness() -> RouteHarness {
    let users = Arc::new(MockUserRepository::new());
    let revoked = Arc::new(MockRevokedTokenRepository::new());
    let attempt_store = Arc::new(InMemoryAttemptStore::new());
    let code_store = Arc::new(InMemoryCodeStore::new());
    let sender = Arc::new(MockSmsSender::new());

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new(TEST_SECRET)));

    let security_guard = Arc::new(SecurityGuard::new(
        attempt_store,
        Arc::clone(&revoked),
        SecurityGuardConfig::default(),
    ));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::clone(&security_guard),
        Arc::clone(&token_service),
        PasswordHasher::new(4),
    ));

    let sms_service = Arc::new(SmsLoginService::new(
        Arc::clone(&users),
        code_store,
        sender,
        Arc::clone(&token_service),
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

    RouteHarness {
        users,
        revoked,
        token_service,
        state,
    }
}

/// Like `test::call_service`, but renders a service-level error into the
/// HTTP response the server would send. `JwtAuth` rejections surface as
/// service errors, which `call_service` would panic on instead of
/// returning the 401/403 response.
async fn call_service_rendering_errors<S, R, B>(app: &S, req: R) -> ServiceResponse<BoxBody>
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.map_into_boxed_body(),
        Err(err) => ServiceResponse::new(
            test::TestRequest::default().to_http_request(),
            HttpResponse::from_error(err),
        ),
    }
}

fn user_with_role(phone: &str, role: UserRole, status: UserStatus) -> User {
    User {
        id: 0,
        phone: phone.to_string(),
        password_hash: None,
        name: "Route Tester".to_string(),
        role,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[actix_web::test]
async fn test_profile_requires_token() {
    let harness = create_route_harness().await;
    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/enroll/my_profile")
        .to_request();
    let resp = call_service_rendering_errors(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_profile_returns_current_user() {
    let harness = create_route_harness().await;
    let user = harness
        .users
        .seed(user_with_role(
            "13812340010",
            UserRole::Student,
            UserStatus::Active,
        ))
        .await;
    let token = harness.token_service.issue(user.id, user.role).unwrap();

    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/enroll/my_profile")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user.id);
    assert_eq!(body["phone"], "13812340010");
    assert_eq!(body["name"], "Route Tester");
    assert_eq!(body["role"], "student");
    assert_eq!(body["status"], "active");
    assert_eq!(
        body["permissions"],
        serde_json::json!(["course:view_all", "enroll:submit"])
    );
}

#[actix_web::test]
async fn test_profile_forbidden_without_enrollment_permission() {
    let harness = create_route_harness().await;
    // Teachers hold no enroll:submit grant in the stock table
    let user = harness
        .users
        .seed(user_with_role(
            "13812340011",
            UserRole::Teacher,
            UserStatus::Active,
        ))
        .await;
    let token = harness.token_service.issue(user.id, user.role).unwrap();

    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/enroll/my_profile")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
}

#[actix_web::test]
async fn test_suspended_account_is_rejected_despite_valid_token() {
    let harness = create_route_harness().await;
    let user = harness
        .users
        .seed(user_with_role(
            "13812340012",
            UserRole::Student,
            UserStatus::Suspended,
        ))
        .await;
    let token = harness.token_service.issue(user.id, user.role).unwrap();

    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/enroll/my_profile")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = call_service_rendering_errors(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ACCOUNT_SUSPENDED");
}

#[actix_web::test]
async fn test_cleanup_forbidden_for_students() {
    let harness = create_route_harness().await;
    let user = harness
        .users
        .seed(user_with_role(
            "13812340013",
            UserRole::Student,
            UserStatus::Active,
        ))
        .await;
    let token = harness.token_service.issue(user.id, user.role).unwrap();

    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/maintenance/cleanup")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
}

#[actix_web::test]
async fn test_cleanup_purges_aged_blacklist_entries() {
    let harness = create_route_harness().await;
    let admin = harness
        .users
        .seed(user_with_role(
            "13812340014",
            UserRole::SuperAdmin,
            UserStatus::Active,
        ))
        .await;
    let token = harness.token_service.issue(admin.id, admin.role).unwrap();

    // One entry past the 30-day retention window, one fresh
    harness
        .revoked
        .insert("aged-token-hash", Utc::now() - Duration::days(40))
        .await
        .unwrap();
    harness
        .revoked
        .insert("fresh-token-hash", Utc::now())
        .await
        .unwrap();

    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/maintenance/cleanup")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["removed"], 1);
    assert_eq!(harness.revoked.count().await, 1);
}

#[actix_web::test]
async fn test_health_endpoint_is_public() {
    let harness = create_route_harness().await;
    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "skillup-api");
}

#[actix_web::test]
async fn test_unknown_route_returns_404() {
    let harness = create_route_harness().await;
    let app = test::init_service(create_app(harness.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/does_not_exist")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
