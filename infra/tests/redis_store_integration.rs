//! Integration tests for the Redis-backed stores.
//!
//! These run against a local Redis instance and skip themselves when
//! none is reachable.

use chrono::{Duration, Utc};

use su_core::domain::entities::verification_code::VerificationCode;
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::{CodeCheck, CodeStore};
use su_infra::cache::{CacheConfig, RedisAttemptStore, RedisClient, RedisCodeStore};

/// Connects with a unique key prefix, or returns None when Redis is down
async fn test_client(test_name: &str) -> Option<RedisClient> {
    let prefix = format!("sutest:{}:{}", test_name, Utc::now().timestamp_millis());
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
    )
    .with_prefix(&prefix);

    match RedisClient::connect(config).await {
        Ok(client) => Some(client),
        Err(_) => {
            eprintln!("Skipping test: Redis not available");
            None
        }
    }
}

#[tokio::test]
async fn test_attempt_store_counts_and_locks() {
    let client = match test_client("attempts").await {
        Some(c) => c,
        None => return,
    };
    let store = RedisAttemptStore::new(client);

    let lockout = Duration::minutes(15);
    for expected in 1..=4u32 {
        let record = store.record_failure("13812345678", 5, lockout).await.unwrap();
        assert_eq!(record.failed_count, expected);
        assert!(record.locked_until.is_none());
    }

    let locked = store.record_failure("13812345678", 5, lockout).await.unwrap();
    assert_eq!(locked.failed_count, 5);
    assert!(locked.locked_until.is_some());

    let fetched = store.get("13812345678").await.unwrap().unwrap();
    assert!(fetched.is_locked(Utc::now()));

    // Another identifier is unaffected
    assert!(store.get("13900000000").await.unwrap().is_none());

    store.clear("13812345678").await.unwrap();
    assert!(store.get("13812345678").await.unwrap().is_none());
}

#[tokio::test]
async fn test_attempt_counter_expires_with_lockout() {
    let client = match test_client("lock-expiry").await {
        Some(c) => c,
        None => return,
    };
    let store = RedisAttemptStore::new(client);

    // One-second lockout after two failures
    let lockout = Duration::seconds(1);
    store.record_failure("13811111111", 2, lockout).await.unwrap();
    let locked = store.record_failure("13811111111", 2, lockout).await.unwrap();
    assert!(locked.locked_until.is_some());

    tokio::time::sleep(std::time::Duration::from_millis(1200)).await;

    // Lock and count went away together
    assert!(store.get("13811111111").await.unwrap().is_none());
}

#[tokio::test]
async fn test_code_store_consumes_on_match() {
    let client = match test_client("code-match").await {
        Some(c) => c,
        None => return,
    };
    let store = RedisCodeStore::new(client);

    let code = VerificationCode::new("13822222222", "123456", 300);
    store.store_code(code).await.unwrap();

    assert_eq!(
        store.check_code("13822222222", "123456").await.unwrap(),
        CodeCheck::Valid
    );
    // Consumed: the same code no longer exists
    assert_eq!(
        store.check_code("13822222222", "123456").await.unwrap(),
        CodeCheck::NotFound
    );
}

#[tokio::test]
async fn test_code_store_limits_wrong_guesses() {
    let client = match test_client("code-guesses").await {
        Some(c) => c,
        None => return,
    };
    let store = RedisCodeStore::new(client);

    let code = VerificationCode::new("13833333333", "123456", 300);
    store.store_code(code).await.unwrap();

    for expected_remaining in [2u32, 1, 0] {
        let check = store.check_code("13833333333", "000000").await.unwrap();
        assert_eq!(
            check,
            CodeCheck::Mismatch {
                remaining_attempts: expected_remaining
            }
        );
    }

    // Third wrong guess destroyed the code; even the right one fails now
    assert_eq!(
        store.check_code("13833333333", "123456").await.unwrap(),
        CodeCheck::NotFound
    );
}

#[tokio::test]
async fn test_resend_cooldown() {
    let client = match test_client("cooldown").await {
        Some(c) => c,
        None => return,
    };
    let store = RedisCodeStore::new(client);

    assert!(store
        .resend_cooldown_remaining("13844444444")
        .await
        .unwrap()
        .is_none());

    store.mark_sent("13844444444", 60).await.unwrap();
    let remaining = store
        .resend_cooldown_remaining("13844444444")
        .await
        .unwrap()
        .unwrap();
    assert!(remaining > 0 && remaining <= 60);

    store.clear("13844444444").await.unwrap();
    assert!(store
        .resend_cooldown_remaining("13844444444")
        .await
        .unwrap()
        .is_none());
}
