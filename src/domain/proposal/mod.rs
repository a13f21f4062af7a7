//! Proposal domain module.
//!
//! Negotiation between a sender and a receiver over duty commitments.
//!
//! # Lifecycle
//!
//! `Draft → Sent → {Accepted | Rejected | Countered}`, and from `Countered`
//! again `{Accepted | Rejected | Countered}`. `Accepted` and `Rejected` are
//! terminal. Every counter-offer archives the replaced terms as a
//! `ProposalHistory` entry.

mod aggregate;
mod context;
mod errors;
mod history;
mod notice;
mod status;
mod terms;

pub use aggregate::Proposal;
pub use context::{ActingContext, NoticeBuffer};
pub use errors::ProposalError;
pub use history::ProposalHistory;
pub use notice::{Notice, NoticeLevel};
pub use status::ProposalStatus;
pub use terms::{DutyTerms, MAX_DUTY_LENGTH};
