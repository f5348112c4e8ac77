use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::errors::{DomainError, SecurityError, ValidationError};
use crate::repositories::revoked_token::mock::MockRevokedTokenRepository;
use crate::repositories::RevokedTokenRepository;
use crate::services::guard::{InMemoryAttemptStore, SecurityGuard, SecurityGuardConfig};

type TestGuard = SecurityGuard<InMemoryAttemptStore, MockRevokedTokenRepository>;

fn guard_with(config: SecurityGuardConfig) -> (Arc<MockRevokedTokenRepository>, TestGuard) {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let guard = SecurityGuard::new(
        Arc::new(InMemoryAttemptStore::new()),
        Arc::clone(&repository),
        config,
    );
    (repository, guard)
}

fn default_guard() -> (Arc<MockRevokedTokenRepository>, TestGuard) {
    guard_with(SecurityGuardConfig::default())
}

#[tokio::test]
async fn test_threshold_failures_lock_the_account() {
    let (_, guard) = default_guard();

    for _ in 0..5 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }

    assert!(guard.is_account_locked("13812345678").await.unwrap());

    let remaining = guard.remaining_lockout_seconds("13812345678").await.unwrap();
    assert!(remaining > 14 * 60 && remaining <= 15 * 60);
}

#[tokio::test]
async fn test_one_below_threshold_does_not_lock() {
    let (_, guard) = default_guard();

    for _ in 0..4 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }

    assert!(!guard.is_account_locked("13812345678").await.unwrap());
    assert_eq!(guard.remaining_lockout_seconds("13812345678").await.unwrap(), 0);
}

#[tokio::test]
async fn test_success_resets_the_failure_count() {
    let (_, guard) = default_guard();

    for _ in 0..4 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }
    guard.record_login_attempt("13812345678", true).await.unwrap();

    // Four more failures would have locked without the reset
    for _ in 0..4 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }
    assert!(!guard.is_account_locked("13812345678").await.unwrap());
}

#[tokio::test]
async fn test_identifiers_are_tracked_independently() {
    let (_, guard) = default_guard();

    for _ in 0..5 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }

    assert!(guard.is_account_locked("13812345678").await.unwrap());
    assert!(!guard.is_account_locked("13987654321").await.unwrap());
}

#[tokio::test]
async fn test_empty_identifier_is_rejected() {
    let (_, guard) = default_guard();

    let err = guard.record_login_attempt("", false).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));

    let err = guard.record_login_attempt("   ", true).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_expired_lock_resets_on_observation() {
    // Zero-length lockout expires the instant it is set
    let (_, guard) = guard_with(SecurityGuardConfig {
        max_login_attempts: 3,
        lockout_duration_minutes: 0,
        ..SecurityGuardConfig::default()
    });

    for _ in 0..3 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }

    // The lock is already over; observing it clears the record
    assert!(!guard.is_account_locked("13812345678").await.unwrap());

    // Fresh count afterwards: two failures stay below the threshold
    for _ in 0..2 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }
    assert!(!guard.is_account_locked("13812345678").await.unwrap());
}

#[tokio::test]
async fn test_reset_login_attempts_clears_a_lock() {
    let (_, guard) = default_guard();

    for _ in 0..5 {
        guard.record_login_attempt("13812345678", false).await.unwrap();
    }
    assert!(guard.is_account_locked("13812345678").await.unwrap());

    guard.reset_login_attempts("13812345678").await.unwrap();
    assert!(!guard.is_account_locked("13812345678").await.unwrap());
}

#[test]
fn test_hash_token_is_a_sha256_hex_digest() {
    let hash = TestGuard::hash_token("abc");

    assert_eq!(
        hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_ne!(TestGuard::hash_token("abd"), hash);
}

#[tokio::test]
async fn test_blacklisted_token_is_detected() {
    let (repository, guard) = default_guard();

    guard.add_token_to_blacklist("some.jwt.token").await.unwrap();

    assert!(guard.is_token_blacklisted("some.jwt.token").await);
    assert!(!guard.is_token_blacklisted("another.jwt.token").await);
    assert!(repository.contains(&TestGuard::hash_token("some.jwt.token")).await);
}

#[tokio::test]
async fn test_revoking_twice_is_idempotent() {
    let (repository, guard) = default_guard();

    guard.add_token_to_blacklist("some.jwt.token").await.unwrap();
    guard.add_token_to_blacklist("some.jwt.token").await.unwrap();

    assert_eq!(repository.count().await, 1);
}

#[tokio::test]
async fn test_persistence_failure_still_blacklists_in_memory() {
    let (repository, guard) = default_guard();
    repository.fail_writes(true);

    let err = guard.add_token_to_blacklist("some.jwt.token").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Security(SecurityError::BlacklistPersistenceFailed { .. })
    ));

    // The process-local revocation holds even though the write failed
    assert!(guard.is_token_blacklisted("some.jwt.token").await);
    assert_eq!(repository.count().await, 0);
}

#[tokio::test]
async fn test_load_blacklist_seeds_memory_from_storage() {
    let (repository, guard) = default_guard();

    let hash = TestGuard::hash_token("persisted.jwt.token");
    repository.insert(&hash, Utc::now()).await.unwrap();

    assert!(!guard.is_token_blacklisted("persisted.jwt.token").await);

    let count = guard.load_blacklist().await.unwrap();
    assert_eq!(count, 1);
    assert!(guard.is_token_blacklisted("persisted.jwt.token").await);
}

#[tokio::test]
async fn test_cleanup_removes_only_entries_past_retention() {
    let (repository, guard) = default_guard();

    let stale = TestGuard::hash_token("stale.jwt.token");
    let recent = TestGuard::hash_token("recent.jwt.token");
    repository
        .insert(&stale, Utc::now() - Duration::days(40))
        .await
        .unwrap();
    repository.insert(&recent, Utc::now()).await.unwrap();
    guard.load_blacklist().await.unwrap();

    let removed = guard.cleanup_expired_blacklist().await.unwrap();

    assert_eq!(removed, 1);
    assert!(!guard.is_token_blacklisted("stale.jwt.token").await);
    assert!(guard.is_token_blacklisted("recent.jwt.token").await);
    assert_eq!(repository.count().await, 1);
}

#[tokio::test]
async fn test_cleanup_with_nothing_to_remove() {
    let (repository, guard) = default_guard();

    let recent = TestGuard::hash_token("recent.jwt.token");
    repository.insert(&recent, Utc::now()).await.unwrap();
    guard.load_blacklist().await.unwrap();

    assert_eq!(guard.cleanup_expired_blacklist().await.unwrap(), 0);
    assert!(guard.is_token_blacklisted("recent.jwt.token").await);
}
