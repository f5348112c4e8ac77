//! Role-based access control.

mod registry;

pub use registry::RolePermissionRegistry;
