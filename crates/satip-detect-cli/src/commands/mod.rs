//! Command implementations.

pub mod describe;
pub mod discover;

pub use describe::run_describe;
pub use discover::run_discover;
