//! Enrollment route handlers, gated by the permission registry.

pub mod profile;
