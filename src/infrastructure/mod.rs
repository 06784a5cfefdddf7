//! Adapters implementing the domain ports.

pub mod env;
pub mod file;
pub mod http;
pub mod in_memory;
