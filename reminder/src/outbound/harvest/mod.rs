//! Harvest outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `DeveloperRetriever` port.

mod dto;
mod http_gateway;

pub use http_gateway::HarvestHttpGateway;
