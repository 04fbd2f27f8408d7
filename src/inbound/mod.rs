//! Inbound adapters translating external protocols onto the domain ports.

pub mod http;
