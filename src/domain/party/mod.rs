//! Party module.
//!
//! Marketplace accounts (vendors, tour operators, locals, tourists) as seen
//! by the proposal workflow: just enough profile data to name the people
//! behind a negotiation.

mod profile;

pub use profile::{PartyKind, PartyProfile};
