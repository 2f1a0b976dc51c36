//! CLI command implementations.

pub mod common;
pub mod config;
pub mod info;
pub mod multi;
pub mod play_rec;
pub mod plans;
pub mod ports;
pub mod status;
pub mod version;
