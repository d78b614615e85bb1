//! Adapters — implementations of the port traits for the outside world.

pub mod file_config;
pub mod log_sink;
pub mod pwm;
