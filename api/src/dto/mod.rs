//! Request and response types for the HTTP API.

pub mod auth;

pub use auth::{
    CleanupResponse, LoginResponse, LogoutResponse, PasswordLoginRequest, ProfileResponse,
    SendCodeRequest, SendCodeResponse, VerifyCodeRequest,
};
