//! Shared utilities and common types for the SkillUp server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (phone validation, masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, SecurityConfig,
    ServerConfig, SmsConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;
