//! Application layer: ports, commands, events, and the relay service.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
