//! Operational endpoints restricted to super admins.

pub mod cleanup;
