//! SMS one-time-code login.

mod config;
mod memory;
mod service;
mod traits;


pub use config::SmsLoginConfig;
pub use memory::InMemoryCodeStore;
pub use service::SmsLoginService;
pub use traits::{CodeCheck, CodeStore, SmsSender};
