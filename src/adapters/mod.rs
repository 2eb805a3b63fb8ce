//! Adapters implementing the domain ports.

pub mod config_source;
pub mod memory;
pub mod null;
