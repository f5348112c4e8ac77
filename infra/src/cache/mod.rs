//! Cache module for Redis-backed security state.
//!
//! Key layout:
//! - `login:fails:{identifier}` - failed login counter
//! - `login:last:{identifier}` - timestamp of the most recent failure
//! - `login:lock:{identifier}` - lockout marker, TTL is the remaining lockout
//! - `sms:code:{phone}` - hashed active verification code
//! - `sms:attempts:{phone}` - wrong-guess counter for the active code
//! - `sms:cooldown:{phone}` - resend throttle marker

pub mod attempt_store;
pub mod code_store;
pub mod redis_client;

pub use attempt_store::RedisAttemptStore;
pub use code_store::RedisCodeStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use su_shared::config::cache::CacheConfig;
