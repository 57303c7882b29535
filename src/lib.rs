pub mod config;
pub mod log;
pub mod platform;
pub mod version;
