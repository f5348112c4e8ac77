//! SkillUp authentication server binary.
//!
//! Wires the MySQL repositories, the Redis-backed stores (with an
//! in-memory fallback when Redis is unreachable) and the core services
//! into the HTTP application.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;

use su_api::app::create_app;
use su_api::routes::AppState;
use su_core::services::auth::AuthService;
use su_core::services::guard::{
    InMemoryAttemptStore, LoginAttemptStore, SecurityGuard, SecurityGuardConfig,
};
use su_core::services::password::PasswordHasher;
use su_core::services::rbac::RolePermissionRegistry;
use su_core::services::sms::{CodeStore, InMemoryCodeStore, SmsLoginConfig, SmsLoginService};
use su_core::services::token::TokenService;
use su_infra::cache::{RedisAttemptStore, RedisClient, RedisCodeStore};
use su_infra::database::{
    DatabasePool, MySqlPermissionRepository, MySqlRevokedTokenRepository, MySqlUserRepository,
};
use su_infra::sms::create_sms_sender;
use su_shared::config::AppConfig;

/// How often the background task purges aged-out blacklist entries
const CLEANUP_INTERVAL_SECS: u64 = 3600;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let problems = config.validate();
    if !problems.is_empty() {
        if config.environment.is_production() {
            for problem in &problems {
                log::error!("Configuration problem: {}", problem);
            }
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "refusing to start with invalid configuration",
            ));
        }
        for problem in &problems {
            log::warn!("Configuration problem: {}", problem);
        }
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    match pool.health_check().await {
        Ok(true) => log::info!("Database connection verified"),
        Ok(false) | Err(_) => log::warn!("Database health check failed; continuing startup"),
    }

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let revoked_repository = Arc::new(MySqlRevokedTokenRepository::new(pool.get_pool().clone()));
    let permission_repository = Arc::new(MySqlPermissionRepository::new(pool.get_pool().clone()));

    let permissions = Arc::new(RolePermissionRegistry::new(permission_repository));
    match permissions.reload().await {
        Ok(count) => log::info!("Loaded {} role permission assignment(s)", count),
        Err(error) => log::warn!("Could not load role permissions: {}", error),
    }

    match RedisClient::connect(config.cache.clone()).await {
        Ok(client) => {
            log::info!("Redis connected; login throttling and codes are durable");
            let attempt_store = Arc::new(RedisAttemptStore::new(client.clone()));
            let code_store = Arc::new(RedisCodeStore::new(client));
            serve(
                config,
                user_repository,
                revoked_repository,
                permissions,
                attempt_store,
                code_store,
            )
            .await
        }
        Err(error) => {
            log::warn!(
                "Redis unavailable ({}); using in-memory login throttling and code storage",
                error
            );
            let attempt_store = Arc::new(InMemoryAttemptStore::new());
            let code_store = Arc::new(InMemoryCodeStore::new());
            serve(
                config,
                user_repository,
                revoked_repository,
                permissions,
                attempt_store,
                code_store,
            )
            .await
        }
    }
}

/// Builds the services on top of the chosen stores and runs the server
async fn serve<S, C>(
    config: AppConfig,
    user_repository: Arc<MySqlUserRepository>,
    revoked_repository: Arc<MySqlRevokedTokenRepository>,
    permissions: Arc<RolePermissionRegistry<MySqlPermissionRepository>>,
    attempt_store: Arc<S>,
    code_store: Arc<C>,
) -> io::Result<()>
where
    S: LoginAttemptStore + 'static,
    C: CodeStore + 'static,
{
    let token_service = Arc::new(
        TokenService::from_jwt_config(&config.jwt)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
    );

    let security_guard = Arc::new(SecurityGuard::new(
        attempt_store,
        revoked_repository,
        SecurityGuardConfig::from(&config.security),
    ));

    match security_guard.load_blacklist().await {
        Ok(count) => log::info!("Loaded {} revoked token(s) into the blacklist", count),
        Err(error) => log::warn!("Could not load the revocation blacklist: {}", error),
    }

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&security_guard),
        Arc::clone(&token_service),
        PasswordHasher::default(),
    ));

    let sms_service = Arc::new(SmsLoginService::new(
        user_repository,
        code_store,
        create_sms_sender(&config.sms),
        token_service,
        SmsLoginConfig::from(&config.sms),
    ));

    {
        let guard = Arc::clone(&security_guard);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));
            // The first tick completes immediately; skip it
            interval.tick().await;
            loop {
                interval.tick().await;
                match guard.cleanup_expired_blacklist().await {
                    Ok(0) => {}
                    Ok(removed) => {
                        log::info!("Blacklist cleanup removed {} expired entries", removed)
                    }
                    Err(error) => log::warn!("Blacklist cleanup failed: {}", error),
                }
            }
        });
    }

    let state = web::Data::new(AppState {
        auth_service,
        sms_service,
        security_guard,
        permissions,
    });

    let bind_address = config.server.bind_address();
    let workers = config.server.workers.max(1);
    let keep_alive = Duration::from_secs(config.server.keep_alive);

    log::info!("Starting SkillUp API server at http://{}", bind_address);

    HttpServer::new(move || create_app(state.clone()))
        .workers(workers)
        .keep_alive(keep_alive)
        .bind(&bind_address)?
        .run()
        .await
}
