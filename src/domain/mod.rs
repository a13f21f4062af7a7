//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `party` - Marketplace accounts taking part in negotiations
//! - `proposal` - Proposal lifecycle, history, and notices

pub mod foundation;
pub mod party;
pub mod proposal;
