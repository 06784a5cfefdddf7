//! JSON envelopes exchanged with whatever invokes the dispatcher.

pub mod request_reader;
pub mod response_writer;
