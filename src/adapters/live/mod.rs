//! Live adapters that talk to the real services.

pub mod http;
