//! # SkillUp Infrastructure
//!
//! Concrete implementations of the core layer's repository and service
//! traits:
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis-backed login attempt and verification code stores
//! - **SMS**: verification code delivery providers
//! - **Repositories**: in-memory implementations for development and tests

pub mod cache;
pub mod database;
pub mod repositories;
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS gateway error
    #[error("SMS gateway error: {0}")]
    Sms(String),
}
