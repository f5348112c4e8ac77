//! Authentication orchestration: password login, token verification,
//! and logout.

mod service;


pub use service::AuthService;
