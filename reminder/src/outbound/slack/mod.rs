//! Slack outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `MessageSender` and
//! `BillablePeopleRetriever` ports.

mod dto;
mod http_gateway;

pub use http_gateway::SlackHttpGateway;
