//! Application layer orchestrating the payment flows.
//!
//! `WebhookDispatcher` turns one inbound invoice event into one outbound
//! transfer. `PeriodicIssuer` is the independent batch job that issues
//! synthetic invoices on a schedule. Both only talk to the outside world
//! through the ports in `domain::ports`.

pub mod dispatcher;
pub mod issuer;
pub mod secrets;
