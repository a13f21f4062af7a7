//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProposalRepository` - proposals and their counter-offer history
//! - `PostgresPartyDirectory` - marketplace account profiles

mod party_directory;
mod proposal_repository;

pub use party_directory::PostgresPartyDirectory;
pub use proposal_repository::PostgresProposalRepository;
