//! Client-side verification harness for the cost-manager microservices.
//!
//! Nothing in this crate implements the services themselves. It holds the
//! configuration, HTTP client adapter, readiness poller and response-shape
//! checks that the scenarios under `tests/` are built from.

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod readiness;
