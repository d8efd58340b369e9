pub mod compat;
pub mod config;
pub mod decisions;
pub mod validate;
