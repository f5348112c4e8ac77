//! Response construction helpers shared by route handlers.

pub mod error;
