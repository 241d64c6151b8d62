//! CLI command implementations

pub mod config;
pub mod organize;
pub mod print;
pub mod profiles;
pub mod steps;
