//! Authentication route handlers
//!
//! This module contains the login and session endpoints:
//! - Password login
//! - SMS verification code login (sending and verifying codes)
//! - Logout

pub mod logout;
pub mod password_login;
pub mod send_code;
pub mod verify_code;
