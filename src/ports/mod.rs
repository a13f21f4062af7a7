//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ProposalRepository` - Proposals and their counter-offer history
//! - `PartyDirectory` - Marketplace account profiles
//!
//! ## Notification Ports
//!
//! - `ProposalNotifier` - Per-transition messages to the acting party
//! - `NotificationInbox` - Notices delivered to a party between requests
//! - `AgreementQueue` - Accepted proposals awaiting manual verification
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Bearer token validation

mod agreement_queue;
mod party_directory;
mod proposal_notifier;
mod proposal_repository;
mod session_validator;

pub use agreement_queue::AgreementQueue;
pub use party_directory::PartyDirectory;
pub use proposal_notifier::{NotificationInbox, ProposalNotifier};
pub use proposal_repository::ProposalRepository;
pub use session_validator::SessionValidator;
