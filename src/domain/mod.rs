//! Domain types and the ports the application layer talks through.

pub mod amount;
pub mod credentials;
pub mod event;
pub mod invoice;
pub mod ports;
pub mod transfer;
pub mod webhook;
