//! Account security guard: login throttling and the token blacklist.

mod config;
mod memory;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use config::SecurityGuardConfig;
pub use memory::InMemoryAttemptStore;
pub use service::SecurityGuard;
pub use store::LoginAttemptStore;
