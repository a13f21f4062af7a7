//! TasteLocal proposals - negotiation between food vendors and tour operators.
//!
//! A sender offers duty commitments to a receiver, who may accept, reject
//! or counter. Accepted proposals wait in a queue until an administrator
//! verifies them offline.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
