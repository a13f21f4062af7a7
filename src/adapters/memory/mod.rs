//! In-memory adapters.
//!
//! Used by unit and integration tests, and by anything that needs the
//! workflow without a database.

mod party_directory;
mod proposal_repository;

pub use party_directory::InMemoryPartyDirectory;
pub use proposal_repository::InMemoryProposalRepository;
