//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Proposal and party storage
//! - `memory` - In-process storage for tests and local runs
//! - `notify` - In-app notices and the admin agreement queue
//! - `auth` - Bearer token validation
//! - `http` - REST API

pub mod auth;
pub mod http;
pub mod memory;
pub mod notify;
pub mod postgres;
