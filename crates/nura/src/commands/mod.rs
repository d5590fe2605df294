//! CLI command implementations.

pub mod check_up;
pub mod serve;
