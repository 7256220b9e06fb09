//! makler-core
//!
//! Core types, traits, and utilities shared across the makler ecosystem.
//!
//! - `types`: common data structures (quote rows, orders, positions).
//! - `broker`: the `Broker` capability contract implemented by adapter crates.
//! - `registry`: the broker-id to constructor registry.
//! - `keepalive`: the generic session liveness nudge.
//!
//! This crate is transport-agnostic on purpose: HTTP plumbing, session
//! lifecycle, and quote retrieval live in the `makler-session` and
//! `makler-sina` crates. Everything here can be exercised without a network.
#![warn(missing_docs)]

/// The `Broker` capability contract and adapter metadata.
pub mod broker;
/// Capability labels used in errors and telemetry.
pub mod capability;
/// Unified error type for the makler workspace.
pub mod error;
/// Generic liveness nudge for authenticated broker handles.
pub mod keepalive;
/// Broker-id to constructor registry.
pub mod registry;
pub mod types;

pub use broker::{Broker, BrokerKey};
pub use capability::Capability;
pub use error::MaklerError;
pub use keepalive::{KEEPALIVE_EXTEND_SECS, KEEPALIVE_LEAD_SECS, Keepalive};
pub use registry::BrokerRegistry;
pub use types::*;
