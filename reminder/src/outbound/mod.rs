//! Outbound adapters implementing the domain's driven ports.

pub mod harvest;
mod http_support;
pub mod slack;
